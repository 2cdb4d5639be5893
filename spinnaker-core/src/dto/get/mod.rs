//! `in` step envelopes

use serde::{Deserialize, Serialize};

use crate::domain::version::Version;
use crate::dto::source::Source;

/// Request read by the `in` step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InRequest {
    pub source: Source,
    pub version: Version,
    /// Accepted for compatibility, the step takes no parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}
