//! `check` step
//!
//! Reports the pipeline's executions as versions, starting from the last
//! version the engine has seen.

use spinnaker_client::PipelineApi;
use spinnaker_core::domain::version::{Version, reconcile};
use spinnaker_core::dto::check::{CheckRequest, CheckResponse};
use tracing::{debug, info};

use crate::error::Result;

/// Handles a check request
pub async fn check(api: &dyn PipelineApi, request: &CheckRequest) -> Result<CheckResponse> {
    let source = &request.source;
    let previous = request
        .version
        .as_ref()
        .map(|version| &version.reference);

    let executions = api.list_executions().await?;
    debug!(
        "Reconciling {} execution(s) against {:?}",
        executions.len(),
        previous.map(|reference| reference.as_str())
    );

    let versions: CheckResponse = reconcile(
        &executions,
        &source.spinnaker_pipeline,
        &source.statuses,
        previous,
    )
    .into_iter()
    .map(Version::new)
    .collect();

    info!("Found {} version(s)", versions.len());
    Ok(versions)
}
