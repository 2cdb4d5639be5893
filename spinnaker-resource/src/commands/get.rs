//! `in` step
//!
//! Fetches one execution and stores it in the destination directory as
//! `metadata.json` (the API response as received) and `version` (the
//! execution id).

use chrono::{DateTime, Utc};
use spinnaker_client::PipelineApi;
use spinnaker_core::dto::get::InRequest;
use spinnaker_core::dto::spinnaker::ExecutionDetails;
use spinnaker_core::dto::{MetadataPair, VersionResponse};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::commands::pipeline_metadata;
use crate::error::{ResourceError, Result};

pub const METADATA_FILE: &str = "metadata.json";
pub const VERSION_FILE: &str = "version";

/// Layout of the Unix `date` command, e.g. "Mon Nov 26 15:04:30 UTC 2018"
const DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Handles an in request, writing into `destination`
pub async fn get(
    api: &dyn PipelineApi,
    request: &InRequest,
    destination: &Path,
) -> Result<VersionResponse> {
    let reference = &request.version.reference;
    let raw = api.execution_raw(reference).await?;

    write_file(&destination.join(METADATA_FILE), &raw)?;
    write_file(&destination.join(VERSION_FILE), reference.as_str().as_bytes())?;
    info!("Stored execution {} in {}", reference, destination.display());

    let details: ExecutionDetails = serde_json::from_slice(&raw)
        .map_err(|e| ResourceError::json(format!("execution {}", reference), e))?;

    let mut metadata = pipeline_metadata(&details.application, &details.name);
    metadata.extend([
        MetadataPair::new("Status", &details.status),
        MetadataPair::new("Start time", format_time(details.started_at())),
        MetadataPair::new("End time", format_time(details.ended_at())),
    ]);

    Ok(VersionResponse {
        version: request.version.clone(),
        metadata,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| ResourceError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
