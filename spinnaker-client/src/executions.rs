//! Pipeline execution endpoints

use crate::error::{ClientError, Result};
use crate::{EXECUTION_LIST_LIMIT, SpinnakerClient};
use spinnaker_core::domain::execution::PipelineExecution;
use spinnaker_core::domain::version::VersionRef;
use spinnaker_core::dto::spinnaker::{ExecutionDetails, TriggerRequest, TriggerResponse};
use tracing::{debug, info};

impl SpinnakerClient {
    // =============================================================================
    // Executions
    // =============================================================================

    /// List the most recent executions of the application
    ///
    /// Spinnaker returns executions of every pipeline of the application;
    /// callers filter by pipeline name.
    pub async fn fetch_executions(&self) -> Result<Vec<PipelineExecution>> {
        let url = format!("{}/applications/{}/pipelines", self.base_url, self.application);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", EXECUTION_LIST_LIMIT)])
            .send()
            .await?;

        let executions: Vec<PipelineExecution> = self.handle_response(response, None).await?;
        debug!("Fetched {} execution(s)", executions.len());
        Ok(executions)
    }

    /// Get an execution's JSON exactly as Spinnaker returns it
    pub async fn fetch_execution_raw(&self, id: &VersionRef) -> Result<Vec<u8>> {
        let url = format!("{}/pipelines/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;
        let not_found = format!("pipeline execution ID not found (ID: {})", id);

        self.handle_bytes(response, Some(not_found)).await
    }

    /// Get the parsed summary of an execution
    pub async fn fetch_execution(&self, id: &VersionRef) -> Result<ExecutionDetails> {
        let bytes = self.fetch_execution_raw(id).await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse execution {}: {}", id, e)))
    }

    /// Start a new execution of the configured pipeline
    ///
    /// # Returns
    /// The id of the started execution, taken from the returned reference
    pub async fn start_execution(&self, request: &TriggerRequest) -> Result<VersionRef> {
        let url = format!(
            "{}/pipelines/{}/{}",
            self.base_url, self.application, self.pipeline
        );
        info!(
            "Executing pipeline: '{}/{}'",
            self.application, self.pipeline
        );

        let response = self.client.post(&url).json(request).send().await?;
        let trigger: TriggerResponse = self.handle_response(response, None).await?;

        trigger
            .execution_id()
            .map(VersionRef::from)
            .ok_or_else(|| {
                ClientError::ParseError(format!(
                    "no execution id in trigger reference '{}'",
                    trigger.reference
                ))
            })
    }
}
