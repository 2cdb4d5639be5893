//! Error types for the resource steps

use spinnaker_client::ClientError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for step operations
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Errors that end a step invocation
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Spinnaker rejected a request or could not be reached
    #[error(transparent)]
    Client(#[from] ClientError),

    /// No target status was reached before the poll deadline
    #[error(
        "timed out waiting for configured status(es) after {}",
        format_timeout(.timeout)
    )]
    Timeout { timeout: Duration },

    /// The execution finished with a status outside the target set
    #[error("Pipeline execution reached a final state: {status}")]
    TerminalMismatch { status: String },

    /// Invalid source, params or arguments
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

impl ResourceError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}
