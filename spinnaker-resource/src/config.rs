//! Step configuration
//!
//! Validates the resource `source` block and resolves the poll timing used
//! by the `out` step when it waits for a target status.

use spinnaker_core::dto::source::Source;
use std::time::Duration;

use crate::error::{ResourceError, Result};

/// Poll interval used when `status_check_interval` is not set
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Added to the interval when the timeout would not outlast it
pub const TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// Timing of the status poll loop
///
/// The timeout always exceeds the interval, so at least one poll happens
/// before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollConfig {
    /// Creates a poll configuration, raising a short or missing timeout to
    /// `interval + TIMEOUT_MARGIN`
    pub fn new(interval: Duration, timeout: Option<Duration>) -> Self {
        let timeout = match timeout {
            Some(timeout) if timeout > interval => timeout,
            _ => interval + TIMEOUT_MARGIN,
        };

        Self { interval, timeout }
    }

    /// Resolves the poll timing from `status_check_interval` and
    /// `status_check_timeout`
    pub fn from_source(source: &Source) -> Result<Self> {
        let interval = source
            .status_check_interval()
            .map(|value| parse_duration("status_check_interval", value))
            .transpose()?
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        if interval.is_zero() {
            return Err(ResourceError::configuration(
                "status_check_interval must be greater than 0",
            ));
        }

        if interval.checked_add(TIMEOUT_MARGIN).is_none() {
            return Err(ResourceError::configuration(format!(
                "status_check_interval '{}' is too large",
                source.status_check_interval().unwrap_or_default()
            )));
        }

        let timeout = source
            .status_check_timeout()
            .map(|value| parse_duration("status_check_timeout", value))
            .transpose()?;

        Ok(Self::new(interval, timeout))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, None)
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| {
        ResourceError::configuration(format!("invalid {} '{}': {}", field, value, e))
    })
}

/// Validates the fields every step needs
pub fn validate_source(source: &Source) -> Result<()> {
    if source.spinnaker_api.trim().is_empty() {
        return Err(ResourceError::configuration("spinnaker_api cannot be empty"));
    }

    if !source.spinnaker_api.starts_with("http://") && !source.spinnaker_api.starts_with("https://")
    {
        return Err(ResourceError::configuration(
            "spinnaker_api must start with http:// or https://",
        ));
    }

    if source.spinnaker_application.trim().is_empty() {
        return Err(ResourceError::configuration(
            "spinnaker_application cannot be empty",
        ));
    }

    if source.spinnaker_pipeline.trim().is_empty() {
        return Err(ResourceError::configuration(
            "spinnaker_pipeline cannot be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Source {
        Source {
            spinnaker_api: "https://gate.example.com".to_string(),
            spinnaker_application: "app".to_string(),
            spinnaker_pipeline: "deploy".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_poll_config() {
        let config = PollConfig::from_source(&source()).unwrap();
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.timeout, Duration::from_secs(31));
        assert_eq!(config, PollConfig::default());
    }

    #[test]
    fn test_parses_human_durations() {
        let mut source = source();
        source.status_check_interval = Some("200ms".to_string());
        source.status_check_timeout = Some("5m".to_string());

        let config = PollConfig::from_source(&source).unwrap();
        assert_eq!(config.interval, Duration::from_millis(200));
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_timeout_not_exceeding_interval_is_raised() {
        let config = PollConfig::new(Duration::from_secs(10), Some(Duration::from_secs(10)));
        assert_eq!(config.timeout, Duration::from_secs(11));

        let config = PollConfig::new(Duration::from_secs(10), Some(Duration::from_secs(2)));
        assert_eq!(config.timeout, Duration::from_secs(11));

        let config = PollConfig::new(Duration::from_millis(200), Some(Duration::from_millis(500)));
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_malformed_duration_is_a_configuration_error() {
        let mut bad_interval = source();
        bad_interval.status_check_interval = Some("soon".to_string());
        assert!(matches!(
            PollConfig::from_source(&bad_interval),
            Err(ResourceError::Configuration(_))
        ));

        let mut bad_timeout = source();
        bad_timeout.status_check_timeout = Some("10 parsecs".to_string());
        assert!(matches!(
            PollConfig::from_source(&bad_timeout),
            Err(ResourceError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut source = source();
        source.status_check_interval = Some("0s".to_string());
        assert!(PollConfig::from_source(&source).is_err());
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let mut source = source();
        source.status_check_interval = Some("18446744073709551615s".to_string());

        let err = PollConfig::from_source(&source).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: status_check_interval '18446744073709551615s' is too large"
        );
    }

    #[test]
    fn test_source_validation() {
        let mut source = source();
        assert!(validate_source(&source).is_ok());

        source.spinnaker_api = "gate.example.com".to_string();
        assert!(validate_source(&source).is_err());

        source.spinnaker_api = "http://localhost:8084".to_string();
        assert!(validate_source(&source).is_ok());

        source.spinnaker_pipeline = String::new();
        assert!(validate_source(&source).is_err());

        source.spinnaker_pipeline = "deploy".to_string();
        source.spinnaker_application = " ".to_string();
        assert!(validate_source(&source).is_err());
    }
}
