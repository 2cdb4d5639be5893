//! Execution trigger and status poller
//!
//! Starts a pipeline execution and, when target statuses are configured,
//! polls it on a fixed interval until it reaches one of them, finishes with
//! some other status, or the timeout elapses.

use spinnaker_client::PipelineApi;
use spinnaker_core::domain::execution::PipelineExecution;
use spinnaker_core::domain::status::StatusSet;
use spinnaker_core::domain::version::VersionRef;
use spinnaker_core::dto::spinnaker::TriggerRequest;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::error::{ResourceError, Result};

/// Where an execution stands relative to the target statuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Still running; poll again on the next tick
    Polling,
    /// Reached one of the target statuses
    Satisfied,
    /// Finished with a status outside the target set
    Failed,
}

impl PollState {
    /// Classifies one observed status
    pub fn classify(status: &str, targets: &StatusSet) -> Self {
        if targets.contains(status) {
            PollState::Satisfied
        } else if PipelineExecution::is_in_flight(status) {
            PollState::Polling
        } else {
            PollState::Failed
        }
    }
}

/// Result of a trigger, with the status it settled on when polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggeredExecution {
    pub id: VersionRef,
    pub status: Option<String>,
}

/// Polls one execution until it settles
pub struct ExecutionPoller<'a> {
    api: &'a dyn PipelineApi,
    targets: &'a StatusSet,
    config: PollConfig,
}

impl<'a> ExecutionPoller<'a> {
    /// Creates a new poller
    pub fn new(api: &'a dyn PipelineApi, targets: &'a StatusSet, config: PollConfig) -> Self {
        Self {
            api,
            targets,
            config,
        }
    }

    /// Waits for `id` to reach a target status
    ///
    /// The first poll happens one interval after the call; the deadline is
    /// measured from the call as well. A tick that becomes due at the same
    /// instant as the deadline is handled before the deadline. A failed
    /// status request ends the wait immediately.
    ///
    /// # Returns
    /// The satisfying status
    pub async fn wait_for(&self, id: &VersionRef) -> Result<String> {
        info!(
            "Waiting for execution {} to reach {} (interval: {:?}, timeout: {:?})",
            id, self.targets, self.config.interval, self.config.timeout
        );

        let start = Instant::now();
        let (first_tick, deadline_at) = match (
            start.checked_add(self.config.interval),
            start.checked_add(self.config.timeout),
        ) {
            (Some(first_tick), Some(deadline_at)) => (first_tick, deadline_at),
            _ => {
                return Err(ResourceError::configuration(format!(
                    "poll timeout {} is too large",
                    humantime::format_duration(self.config.timeout)
                )));
            }
        };

        let mut ticker = time::interval_at(first_tick, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let deadline = time::sleep_until(deadline_at);
        tokio::pin!(deadline);

        let mut polls: u32 = 0;

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    polls += 1;
                    let status = self.api.execution_status(id).await?;
                    debug!("Poll {}: execution {} is {}", polls, id, status);

                    match PollState::classify(&status, self.targets) {
                        PollState::Polling => {}
                        PollState::Satisfied => {
                            info!("Execution {} reached {} after {} poll(s)", id, status, polls);
                            return Ok(status);
                        }
                        PollState::Failed => {
                            warn!("Execution {} finished as {}", id, status);
                            return Err(ResourceError::TerminalMismatch { status });
                        }
                    }
                }

                () = &mut deadline => {
                    warn!("Execution {} did not settle after {} poll(s)", id, polls);
                    return Err(ResourceError::Timeout {
                        timeout: self.config.timeout,
                    });
                }
            }
        }
    }
}

/// Triggers an execution and waits for a target status when any is set
///
/// With an empty `targets` set the execution is reported as soon as it has
/// been started.
pub async fn trigger_and_await(
    api: &dyn PipelineApi,
    request: &TriggerRequest,
    targets: &StatusSet,
    config: PollConfig,
) -> Result<TriggeredExecution> {
    let id = api.trigger_execution(request).await?;
    info!("Started execution {}", id);

    if targets.is_empty() {
        return Ok(TriggeredExecution { id, status: None });
    }

    let status = ExecutionPoller::new(api, targets, config)
        .wait_for(&id)
        .await?;

    Ok(TriggeredExecution {
        id,
        status: Some(status),
    })
}
