//! Application and pipeline verification endpoints

use crate::SpinnakerClient;
use crate::error::{ClientError, Result};
use spinnaker_core::dto::spinnaker::PipelineConfigSummary;
use tracing::debug;

impl SpinnakerClient {
    // =============================================================================
    // Verification
    // =============================================================================

    /// Check that the configured application and pipeline both exist
    pub async fn verify(&self) -> Result<()> {
        self.verify_application().await?;
        self.verify_pipeline().await
    }

    /// Check that the configured application exists
    pub async fn verify_application(&self) -> Result<()> {
        let url = format!("{}/applications/{}", self.base_url, self.application);
        debug!("Verifying application {}", self.application);

        let response = self.client.get(&url).send().await?;
        let not_found = format!("spinnaker application {} not found", self.application);

        self.handle_bytes(response, Some(not_found)).await?;
        Ok(())
    }

    /// Check that the configured pipeline is among the application's configs
    pub async fn verify_pipeline(&self) -> Result<()> {
        let url = format!(
            "{}/applications/{}/pipelineConfigs",
            self.base_url, self.application
        );
        debug!("Verifying pipeline {}", self.pipeline);

        let response = self.client.get(&url).send().await?;
        let configs: Vec<PipelineConfigSummary> = self.handle_response(response, None).await?;

        if configs.iter().any(|config| config.name == self.pipeline) {
            Ok(())
        } else {
            Err(ClientError::NotFound(format!(
                "spinnaker pipeline {} not found",
                self.pipeline
            )))
        }
    }
}
