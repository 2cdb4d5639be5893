//! `check` step envelopes

use serde::{Deserialize, Serialize};

use crate::domain::version::Version;
use crate::dto::source::Source;

/// Request read by the `check` step
///
/// `version` is absent (or `null`) on the very first check of a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
}

/// Response of the `check` step: versions in ascending build-time order
pub type CheckResponse = Vec<Version>;
