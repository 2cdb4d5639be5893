//! Pipeline execution domain types

use serde::{Deserialize, Serialize};

/// Statuses of an execution that has not finished yet
pub const IN_FLIGHT_STATUSES: [&str; 3] = ["RUNNING", "NOT_STARTED", "BUFFERED"];

/// One run of a pipeline as listed by the remote service
///
/// Identity is the `id`; the remote service may report a different
/// `status` for the same id on later observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Epoch milliseconds
    #[serde(default)]
    pub build_time: i64,
    #[serde(default)]
    pub status: String,
}

impl PipelineExecution {
    /// Whether `status` still means the execution is in progress
    pub fn is_in_flight(status: &str) -> bool {
        IN_FLIGHT_STATUSES.contains(&status)
    }
}
