//! `out` step
//!
//! Triggers the pipeline and, when `statuses` are configured, waits for the
//! new execution to reach one of them.

use spinnaker_client::PipelineApi;
use spinnaker_core::domain::version::Version;
use spinnaker_core::dto::put::OutRequest;
use spinnaker_core::dto::{MetadataPair, VersionResponse};
use std::path::Path;
use tracing::info;

use crate::commands::pipeline_metadata;
use crate::config::PollConfig;
use crate::error::Result;
use crate::payload::build_trigger_request;
use crate::poller::trigger_and_await;

/// Handles an out request; trigger files resolve against `sources_dir`
pub async fn put(
    api: &dyn PipelineApi,
    request: &OutRequest,
    sources_dir: &Path,
) -> Result<VersionResponse> {
    let source = &request.source;

    // Resolve everything that can fail locally before starting an execution
    let poll_config = PollConfig::from_source(source)?;
    let trigger = build_trigger_request(&request.params, sources_dir)?;

    let triggered = trigger_and_await(api, &trigger, &source.statuses, poll_config).await?;
    info!("Pipeline executed successfully");

    let mut metadata = pipeline_metadata(&source.spinnaker_application, &source.spinnaker_pipeline);
    if let Some(status) = &triggered.status {
        metadata.push(MetadataPair::new("Status", status));
    }

    Ok(VersionResponse {
        version: Version::new(triggered.id),
        metadata,
    })
}
