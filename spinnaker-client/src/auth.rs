//! Authentication providers
//!
//! Each provider turns credentials from the resource source into a
//! `reqwest::Client` that is already authenticated against the Spinnaker
//! API: either through a TLS client certificate (x509) or through a
//! form login that leaves a session cookie in the client's cookie store.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::tls::Version;
use reqwest::{Certificate, Client, ClientBuilder, Identity, StatusCode};
use spinnaker_core::dto::source::Source;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// Builds an authenticated HTTP client for a Spinnaker API
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Short provider name for logging
    fn name(&self) -> &'static str;

    /// Builds the client, performing any login round-trips needed
    async fn build_client(&self, api_url: &str) -> Result<Client>;
}

/// Server-side TLS settings shared by all providers
#[derive(Debug, Clone, Default)]
pub struct TlsSettings {
    /// Disable verification of the server certificate
    pub skip_verify: bool,
    /// Extra trusted root certificate (PEM)
    pub ca_cert: Option<String>,
}

impl TlsSettings {
    pub fn from_source(source: &Source) -> Self {
        Self {
            skip_verify: source.skip_tls_verify,
            ca_cert: source.ca_cert().map(str::to_string),
        }
    }

    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder> {
        let mut builder = builder
            .use_rustls_tls()
            .min_tls_version(Version::TLS_1_2);

        if let Some(pem) = &self.ca_cert {
            let certificate = Certificate::from_pem(pem.as_bytes())
                .map_err(|e| ClientError::InvalidConfig(format!("invalid CA certificate: {}", e)))?;
            builder = builder.add_root_certificate(certificate);
        }

        if self.skip_verify {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder)
    }
}

/// Authenticates with a TLS client certificate
pub struct X509Auth {
    cert: String,
    key: String,
    tls: TlsSettings,
}

impl X509Auth {
    pub fn new(cert: impl Into<String>, key: impl Into<String>, tls: TlsSettings) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
            tls,
        }
    }
}

#[async_trait]
impl AuthProvider for X509Auth {
    fn name(&self) -> &'static str {
        "x509"
    }

    async fn build_client(&self, _api_url: &str) -> Result<Client> {
        let pem = format!("{}\n{}", self.cert.trim_end(), self.key.trim_end());
        let identity = Identity::from_pem(pem.as_bytes()).map_err(|e| {
            ClientError::InvalidConfig(format!("invalid x509 certificate or key: {}", e))
        })?;

        let client = self.tls.apply(Client::builder().identity(identity))?.build()?;
        Ok(client)
    }
}

/// Authenticates with a username/password form login (LDAP-backed gate)
pub struct LdapAuth {
    username: String,
    password: String,
    tls: TlsSettings,
}

impl LdapAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>, tls: TlsSettings) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tls,
        }
    }
}

#[async_trait]
impl AuthProvider for LdapAuth {
    fn name(&self) -> &'static str {
        "ldap"
    }

    async fn build_client(&self, api_url: &str) -> Result<Client> {
        let api_url = api_url.trim_end_matches('/');
        let builder = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none());
        let client = self.tls.apply(builder)?.build()?;

        let login_url = format!("{}/login", api_url);
        let response = client
            .post(&login_url)
            .form(&[("username", &self.username), ("password", &self.password)])
            .send()
            .await?;

        if response.status() != StatusCode::FOUND {
            return Err(ClientError::AuthFailed(format!(
                "login status code={}",
                response.status().as_u16()
            )));
        }

        // The login response does not say whether it worked; an
        // authenticated request does.
        let probe_url = format!("{}/applications", api_url);
        let response = client.get(&probe_url).send().await?;

        match response.status() {
            StatusCode::OK => {
                debug!("Logged in as {}", self.username);
                Ok(client)
            }
            StatusCode::FOUND => Err(ClientError::AuthFailed(
                "invalid username or password".to_string(),
            )),
            status => Err(ClientError::AuthFailed(format!(
                "unexpected status code {} after login",
                status.as_u16()
            ))),
        }
    }
}

/// Selects the authentication provider configured in `source`
///
/// Username/password login wins when both are present; otherwise an x509
/// certificate and key are required.
pub fn provider_for(source: &Source) -> Result<Box<dyn AuthProvider>> {
    let tls = TlsSettings::from_source(source);

    match (source.username(), source.password()) {
        (Some(username), Some(password)) => {
            return Ok(Box::new(LdapAuth::new(username, password, tls)));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(ClientError::InvalidConfig(
                "spinnaker_username and spinnaker_password must be set together".to_string(),
            ));
        }
        (None, None) => {}
    }

    match (source.x509_cert(), source.x509_key()) {
        (Some(cert), Some(key)) => Ok(Box::new(X509Auth::new(cert, key, tls))),
        (Some(_), None) | (None, Some(_)) => Err(ClientError::InvalidConfig(
            "spinnaker_x509_cert and spinnaker_x509_key must be set together".to_string(),
        )),
        (None, None) => Err(ClientError::InvalidConfig(
            "no credentials configured: set spinnaker_x509_cert and spinnaker_x509_key, \
             or spinnaker_username and spinnaker_password"
                .to_string(),
        )),
    }
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
    fn test_ldap_selected_when_credentials_present() {
        let mut source = source();
        source.username = Some("admin".to_string());
        source.password = Some("secret".to_string());
        source.x509_cert = Some("CERT".to_string());
        source.x509_key = Some("KEY".to_string());

        let provider = provider_for(&source).unwrap();
        assert_eq!(provider.name(), "ldap");
    }

    #[test]
    fn test_x509_selected_without_login() {
        let mut source = source();
        source.x509_cert = Some("CERT".to_string());
        source.x509_key = Some("KEY".to_string());

        let provider = provider_for(&source).unwrap();
        assert_eq!(provider.name(), "x509");
    }

    #[test]
    fn test_half_configured_credentials_rejected() {
        let mut login_only = source();
        login_only.username = Some("admin".to_string());
        assert!(matches!(
            provider_for(&login_only),
            Err(ClientError::InvalidConfig(_))
        ));

        let mut key_only = source();
        key_only.x509_key = Some("KEY".to_string());
        assert!(matches!(
            provider_for(&key_only),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_no_credentials_rejected() {
        let mut source = source();
        source.x509_cert = Some(String::new());
        source.x509_key = Some("  ".to_string());
        assert!(matches!(
            provider_for(&source),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_certificate_rejected() {
        let provider = X509Auth::new("not a cert", "not a key", TlsSettings::default());
        let result = provider.build_client("https://gate.example.com").await;
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }
}
