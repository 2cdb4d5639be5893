//! Spinnaker HTTP Client
//!
//! A small, typed client for the parts of the Spinnaker (gate) API used by
//! the pipeline resource: verifying that an application and pipeline exist,
//! listing and reading pipeline executions, and triggering new ones.
//!
//! # Example
//!
//! ```no_run
//! use spinnaker_client::{PipelineApi, SpinnakerClient};
//! use spinnaker_core::dto::source::Source;
//!
//! # async fn example(source: Source) -> spinnaker_client::Result<()> {
//! // Builds an authenticated client and verifies the application and pipeline
//! let client = SpinnakerClient::connect(&source).await?;
//!
//! for execution in client.list_executions().await? {
//!     println!("{} {}", execution.id, execution.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod error;
mod applications;
mod executions;

// Re-export commonly used types
pub use api::PipelineApi;
pub use auth::{AuthProvider, LdapAuth, TlsSettings, X509Auth};
pub use error::{ClientError, Result};

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use spinnaker_core::dto::source::Source;
use tracing::debug;

/// Number of most recent executions requested when listing
pub const EXECUTION_LIST_LIMIT: u32 = 25;

/// HTTP client bound to one Spinnaker application and pipeline
///
/// The client is created once per step invocation and passed explicitly
/// to whatever needs to talk to Spinnaker.
#[derive(Debug, Clone)]
pub struct SpinnakerClient {
    /// Base URL of the Spinnaker API (e.g., "https://gate.example.com")
    base_url: String,
    application: String,
    pipeline: String,
    /// HTTP client instance, already carrying the authentication state
    client: Client,
}

impl SpinnakerClient {
    /// Create a client around an already configured HTTP client
    ///
    /// No request is made; use [`SpinnakerClient::verify`] to check that the
    /// application and pipeline exist.
    ///
    /// # Example
    /// ```
    /// use spinnaker_client::SpinnakerClient;
    ///
    /// let client = SpinnakerClient::with_client(
    ///     "http://localhost:8084/",
    ///     "my-app",
    ///     "deploy",
    ///     reqwest::Client::new(),
    /// );
    /// assert_eq!(client.base_url(), "http://localhost:8084");
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        application: impl Into<String>,
        pipeline: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            application: application.into(),
            pipeline: pipeline.into(),
            client,
        }
    }

    /// Build an authenticated client from the resource source and verify it
    ///
    /// Selects the authentication provider from the configured credentials,
    /// then checks that the application and the pipeline exist.
    pub async fn connect(source: &Source) -> Result<Self> {
        let provider = auth::provider_for(source)?;
        debug!("Authenticating with {} provider", provider.name());

        let http = provider.build_client(&source.spinnaker_api).await?;
        let client = Self::with_client(
            &source.spinnaker_api,
            &source.spinnaker_application,
            &source.spinnaker_pipeline,
            http,
        );

        client.verify().await?;
        Ok(client)
    }

    /// Get the base URL of the Spinnaker API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code of a response
    ///
    /// A 404 becomes [`ClientError::NotFound`] carrying `not_found` when the
    /// caller has a specific message for it; every other non-success status
    /// becomes an API error with the response body.
    async fn ensure_success(response: Response, not_found: Option<String>) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            if let Some(message) = not_found {
                return Err(ClientError::NotFound(message));
            }
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        not_found: Option<String>,
    ) -> Result<T> {
        let bytes = self.handle_bytes(response, not_found).await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response and return the body exactly as received
    async fn handle_bytes(&self, response: Response, not_found: Option<String>) -> Result<Vec<u8>> {
        let response = Self::ensure_success(response, not_found).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
