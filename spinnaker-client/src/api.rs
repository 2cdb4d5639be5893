//! Pipeline API abstraction
//!
//! The step logic talks to Spinnaker only through this trait so it can be
//! driven by a scripted fake in tests.

use async_trait::async_trait;
use spinnaker_core::domain::execution::PipelineExecution;
use spinnaker_core::domain::version::VersionRef;
use spinnaker_core::dto::spinnaker::{ExecutionDetails, TriggerRequest};

use crate::SpinnakerClient;
use crate::error::Result;

/// Operations on one Spinnaker pipeline
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Lists recent executions of the pipeline's application
    async fn list_executions(&self) -> Result<Vec<PipelineExecution>>;

    /// Fetches an execution's JSON as received
    async fn execution_raw(&self, id: &VersionRef) -> Result<Vec<u8>>;

    /// Fetches the parsed summary of an execution
    async fn execution(&self, id: &VersionRef) -> Result<ExecutionDetails>;

    /// Starts an execution and returns its id
    async fn trigger_execution(&self, request: &TriggerRequest) -> Result<VersionRef>;

    /// Current status of an execution
    async fn execution_status(&self, id: &VersionRef) -> Result<String> {
        Ok(self.execution(id).await?.status)
    }
}

#[async_trait]
impl PipelineApi for SpinnakerClient {
    async fn list_executions(&self) -> Result<Vec<PipelineExecution>> {
        self.fetch_executions().await
    }

    async fn execution_raw(&self, id: &VersionRef) -> Result<Vec<u8>> {
        self.fetch_execution_raw(id).await
    }

    async fn execution(&self, id: &VersionRef) -> Result<ExecutionDetails> {
        self.fetch_execution(id).await
    }

    async fn trigger_execution(&self, request: &TriggerRequest) -> Result<VersionRef> {
        self.start_execution(request).await
    }
}
