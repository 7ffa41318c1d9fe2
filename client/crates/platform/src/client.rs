//! Hosted provider HTTP transport
//!
//! Owns transport details only: endpoint resolution, the `apikey` and bearer
//! headers, timeouts, and turning non-success responses into
//! [`ProviderError::Rejected`] with the provider's own message.

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::session::SessionTokens;

/// Fields the auth and data APIs use for human-readable error text, in priority order
const MESSAGE_FIELDS: &[&str] = &["msg", "message", "error_description", "error"];

/// Transport-level errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("{operation} rejected ({status}): {message}")]
    Rejected {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("{operation} returned an unexpected body: {detail}")]
    Decode {
        operation: &'static str,
        detail: String,
    },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Rejected { status, .. } => Some(*status),
            ProviderError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for a user notice (may be empty)
    pub fn provider_message(&self) -> String {
        match self {
            ProviderError::Rejected { message, .. } => message.clone(),
            ProviderError::Transport(e) if e.is_timeout() => "The request timed out".to_string(),
            ProviderError::Transport(e) if e.is_connect() => "Could not reach the server".to_string(),
            ProviderError::Transport(_) => String::new(),
            ProviderError::Decode { .. } | ProviderError::InvalidEndpoint(_) => String::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Client for one hosted provider project
#[derive(Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    session: SessionTokens,
}

impl ProviderClient {
    /// Build a client with the configured request timeout
    pub fn new(config: &ProviderConfig, session: SessionTokens) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionTokens {
        &self.session
    }

    /// Resolve a path relative to the project URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{path}: {e}")))
    }

    /// Start a request carrying the `apikey` header and the best bearer token available
    ///
    /// The session access token is used when one is held, otherwise the anon key.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ProviderError> {
        let url = self.endpoint(path)?;
        let bearer = self
            .session
            .access_token()
            .await
            .unwrap_or_else(|| self.anon_key.clone());

        Ok(self
            .http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(bearer))
    }

    /// Send and require a success status
    pub async fn send(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<Response, ProviderError> {
        let response = request.send().await?;
        ensure_success(response, operation).await
    }

    /// Send, require success, and decode a JSON body
    pub async fn send_json<T>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(request, operation).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode {
            operation,
            detail: e.to_string(),
        })
    }
}

/// Checks HTTP response status; returns the response on success or the provider's complaint
pub async fn ensure_success(
    response: Response,
    operation: &'static str,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_default();

    tracing::debug!(
        operation,
        status = status.as_u16(),
        message = %message,
        "Provider rejected request"
    );

    Err(ProviderError::Rejected {
        operation,
        status: status.as_u16(),
        message,
    })
}

/// Pull the human-readable message out of an auth or data API error body
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    MESSAGE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
