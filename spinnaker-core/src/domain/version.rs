//! Version references and reconciliation
//!
//! A version, as the pipeline engine sees it, is the id of one pipeline
//! execution. The reconciler turns the executions currently listed by the
//! remote service into the stream of versions the engine should consider
//! new, given the last version it has already seen.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::execution::PipelineExecution;
use crate::domain::status::StatusSet;

/// Opaque reference to one pipeline execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionRef(String);

impl VersionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VersionRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Version object as exchanged with the pipeline engine: `{"ref": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(rename = "ref", default)]
    pub reference: VersionRef,
}

impl Version {
    pub fn new(reference: impl Into<VersionRef>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Computes the versions the engine should consider new
///
/// Executions are narrowed to `pipeline_name` and to `statuses` (an empty
/// set keeps all), then ordered by ascending build time. When `previous` is
/// found among them, it and every later execution are returned; otherwise
/// only the latest one is. No matching execution at all yields an empty list.
pub fn reconcile(
    executions: &[PipelineExecution],
    pipeline_name: &str,
    statuses: &StatusSet,
    previous: Option<&VersionRef>,
) -> Vec<VersionRef> {
    let mut matching: Vec<&PipelineExecution> = executions
        .iter()
        .filter(|execution| execution.name == pipeline_name)
        .filter(|execution| statuses.accepts(&execution.status))
        .collect();

    if matching.is_empty() {
        return Vec::new();
    }

    matching.sort_by_key(|execution| execution.build_time);

    let latest = matching.len() - 1;
    let start = previous
        .filter(|reference| !reference.is_empty())
        .and_then(|reference| {
            matching
                .iter()
                .position(|execution| execution.id == reference.as_str())
        })
        .unwrap_or(latest);

    matching[start..]
        .iter()
        .map(|execution| VersionRef::from(execution.id.as_str()))
        .collect()
}
