//! Resource `source` configuration
//!
//! The block every step request carries. Empty strings are treated the same
//! as absent values by the accessors below.

use serde::{Deserialize, Serialize};

use crate::domain::status::StatusSet;

/// Resource configuration shared by all steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Base URL of the Spinnaker API (gate)
    pub spinnaker_api: String,
    pub spinnaker_application: String,
    pub spinnaker_pipeline: String,

    /// Statuses accepted by `check` and awaited by `out`
    pub statuses: StatusSet,

    /// Human-readable durations, e.g. "30s" or "200ms"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_check_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_check_timeout: Option<String>,

    #[serde(rename = "spinnaker_x509_cert", skip_serializing_if = "Option::is_none")]
    pub x509_cert: Option<String>,
    #[serde(rename = "spinnaker_x509_key", skip_serializing_if = "Option::is_none")]
    pub x509_key: Option<String>,

    #[serde(rename = "spinnaker_username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "spinnaker_password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Extra PEM root certificate trusted for the API endpoint
    #[serde(rename = "spinnaker_ca_cert", skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,

    #[serde(rename = "spinnaker_skip_tls_verify")]
    pub skip_tls_verify: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Source {
    pub fn x509_cert(&self) -> Option<&str> {
        non_empty(&self.x509_cert)
    }

    pub fn x509_key(&self) -> Option<&str> {
        non_empty(&self.x509_key)
    }

    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn ca_cert(&self) -> Option<&str> {
        non_empty(&self.ca_cert)
    }

    pub fn status_check_interval(&self) -> Option<&str> {
        non_empty(&self.status_check_interval)
    }

    pub fn status_check_timeout(&self) -> Option<&str> {
        non_empty(&self.status_check_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_field_names() {
        let json = r#"{
            "spinnaker_api": "https://gate.example.com",
            "spinnaker_application": "app",
            "spinnaker_pipeline": "deploy",
            "statuses": ["SUCCEEDED"],
            "status_check_interval": "200ms",
            "status_check_timeout": "",
            "spinnaker_x509_cert": "CERT",
            "spinnaker_x509_key": "KEY",
            "spinnaker_skip_tls_verify": true
        }"#;

        let source: Source = serde_json::from_str(json).unwrap();
        assert_eq!(source.spinnaker_api, "https://gate.example.com");
        assert_eq!(source.spinnaker_pipeline, "deploy");
        assert!(source.statuses.contains("SUCCEEDED"));
        assert_eq!(source.status_check_interval(), Some("200ms"));
        assert_eq!(source.status_check_timeout(), None);
        assert_eq!(source.x509_cert(), Some("CERT"));
        assert_eq!(source.username(), None);
        assert!(source.skip_tls_verify);
    }

    #[test]
    fn test_missing_fields_default() {
        let source: Source = serde_json::from_str("{}").unwrap();
        assert!(source.spinnaker_api.is_empty());
        assert!(source.statuses.is_empty());
        assert!(!source.skip_tls_verify);
    }
}
