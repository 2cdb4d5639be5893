//! Spinnaker API wire types
//!
//! Only the fields the resource reads are modelled; everything else in the
//! remote payloads is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trigger type reported to Spinnaker for executions started by the resource
pub const TRIGGER_TYPE: &str = "concourse-resource";

/// Entry of `GET /applications/{app}/pipelineConfigs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfigSummary {
    #[serde(default)]
    pub name: String,
}

/// Body of `POST /pipelines/{app}/{pipeline}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRequest {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<serde_json::Value>,
}

impl Default for TriggerRequest {
    fn default() -> Self {
        Self {
            trigger_type: TRIGGER_TYPE.to_string(),
            parameters: None,
            artifacts: None,
        }
    }
}

/// Response of a trigger request, e.g. `{"ref": "/pipelines/01ABC"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl TriggerResponse {
    /// Trailing path segment of the reference, which is the execution id
    pub fn execution_id(&self) -> Option<&str> {
        self.reference
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

/// Subset of `GET /pipelines/{id}` shown as step metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionDetails {
    pub name: String,
    pub application: String,
    pub status: String,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
    /// Epoch milliseconds, absent while the execution is running
    pub end_time: Option<i64>,
}

impl ExecutionDetails {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.end_time.and_then(DateTime::from_timestamp_millis)
    }
}
