//! Request/response envelopes
//!
//! Every step reads exactly one JSON request and, on success, writes exactly
//! one JSON response. Failures are reported on stderr with a stable
//! `error <step> step failed:` prefix.

use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::{Read, Write};

use crate::error::{ResourceError, Result};

/// The three steps of the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Check,
    Get,
    Put,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Check => "check",
            Step::Get => "get",
            Step::Put => "put",
        };
        f.write_str(name)
    }
}

/// Parses command-line arguments
///
/// Help and version requests print and exit as usual; any other parse
/// failure becomes a configuration error so it is reported like every
/// other step failure.
pub fn parse_args<C: Parser>() -> Result<C> {
    parse_args_from(std::env::args_os())
}

/// Parses the given command line, program name first
pub fn parse_args_from<C, I, T>(args: I) -> Result<C>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    C::try_parse_from(args).map_err(|e| match e.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => e.exit(),
        _ => ResourceError::configuration(e.to_string().trim_end().to_string()),
    })
}

/// Reads one JSON request
pub fn read_request<T: DeserializeOwned>(reader: impl Read) -> Result<T> {
    serde_json::from_reader(reader).map_err(|e| ResourceError::json("request", e))
}

/// Writes one JSON response followed by a newline
pub fn write_response<T: Serialize>(mut writer: impl Write, response: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, response).map_err(|e| ResourceError::json("response", e))?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|source| ResourceError::Io {
            action: "write",
            path: "stdout".into(),
            source,
        })
}

/// Renders the failure line for a step
pub fn failure_message(step: Step, err: &anyhow::Error) -> String {
    format!("error {} step failed: {:#}", step, err)
}

/// Prints the failure line for a step to stderr
pub fn report_failure(step: Step, err: &anyhow::Error) {
    eprintln!("{}", failure_message(step, err).red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinnaker_core::dto::check::CheckRequest;
    use spinnaker_core::dto::put::OutRequest;

    #[test]
    fn test_read_check_request_without_version() {
        let input = br#"{"source": {"spinnaker_api": "http://gate", "spinnaker_application": "app", "spinnaker_pipeline": "foo"}}"#;
        let request: CheckRequest = read_request(&input[..]).unwrap();
        assert!(request.version.is_none());
        assert_eq!(request.source.spinnaker_pipeline, "foo");

        let input = br#"{"source": {}, "version": null}"#;
        let request: CheckRequest = read_request(&input[..]).unwrap();
        assert!(request.version.is_none());
    }

    #[test]
    fn test_read_out_request_params() {
        let input = br#"{
            "source": {"spinnaker_api": "http://gate"},
            "params": {"trigger_params": {"foo": "$BAR"}, "artifacts": "artifacts.json"}
        }"#;
        let request: OutRequest = read_request(&input[..]).unwrap();
        let params = request.params.trigger_params.unwrap();
        assert_eq!(params.get("foo").map(String::as_str), Some("$BAR"));
        assert_eq!(request.params.artifacts.as_deref(), Some("artifacts.json"));
    }

    #[test]
    fn test_malformed_request_is_an_error() {
        let result: Result<CheckRequest> = read_request(&b"not json"[..]);
        assert!(matches!(result, Err(ResourceError::Json { .. })));
    }

    #[test]
    fn test_write_response_is_single_json_line() {
        let mut out = Vec::new();
        let versions = vec![spinnaker_core::domain::version::Version::new("EX1")];
        write_response(&mut out, &versions).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[{\"ref\":\"EX1\"}]\n");
    }

    #[derive(Debug, Parser)]
    #[command(name = "in")]
    struct DestinationCli {
        destination: std::path::PathBuf,
    }

    #[test]
    fn test_missing_positional_is_a_configuration_error() {
        let err = parse_args_from::<DestinationCli, _, _>(["in"]).unwrap_err();
        match err {
            ResourceError::Configuration(message) => assert!(message.contains("<DESTINATION>")),
            other => panic!("unexpected error: {other:?}"),
        }

        let cli: DestinationCli = parse_args_from(["in", "/tmp/build/get"]).unwrap();
        assert_eq!(cli.destination, std::path::Path::new("/tmp/build/get"));
    }

    #[test]
    fn test_failure_message_prefix() {
        let err = anyhow::Error::new(ResourceError::TerminalMismatch {
            status: "TERMINAL".to_string(),
        });
        assert_eq!(
            failure_message(Step::Put, &err),
            "error put step failed: Pipeline execution reached a final state: TERMINAL"
        );
    }
}
