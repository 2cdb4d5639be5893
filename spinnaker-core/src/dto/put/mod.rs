//! `out` step envelopes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dto::source::Source;

/// Parameters of the `out` step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutParams {
    /// Static trigger parameters; values may reference environment variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_params: Option<BTreeMap<String, String>>,

    /// JSON file, relative to the sources directory, holding trigger parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_params_json_file_path: Option<String>,

    /// JSON file, relative to the sources directory, holding trigger artifacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<String>,
}

/// Request read by the `out` step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutRequest {
    pub source: Source,
    #[serde(default)]
    pub params: OutParams,
}
