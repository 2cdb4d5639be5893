//! Error types for the Spinnaker client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the Spinnaker API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("HTTP request failed")]
    RequestFailed(#[from] reqwest::Error),

    /// The application, pipeline or execution does not exist
    #[error("{0}")]
    NotFound(String),

    /// API returned a non-success status code
    #[error("spinnaker api responded with status code: {status}, body: {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Login was rejected or could not be confirmed
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Credentials or TLS material are missing or malformed
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create an API error from status code and body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }
}
