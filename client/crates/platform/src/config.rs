//! Provider Configuration
//!
//! Where the hosted provider lives and how to talk to it.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const ENV_PROVIDER_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_TIMEOUT_SECS: &str = "PROVIDER_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "SESSION_FILE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Hosted provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Project base URL, always ending in `/`
    pub base_url: Url,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
    /// Where to mirror the provider session, if anywhere
    pub session_file: Option<PathBuf>,
}

impl ProviderConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get(ENV_PROVIDER_URL).ok_or(ConfigError::Missing(ENV_PROVIDER_URL))?;
        let base_url = parse_base_url(&raw_url)?;

        let anon_key = get(ENV_ANON_KEY).ok_or(ConfigError::Missing(ENV_ANON_KEY))?;

        let request_timeout = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: ENV_TIMEOUT_SECS,
                    reason: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: ENV_TIMEOUT_SECS,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            anon_key,
            request_timeout,
            session_file: get(ENV_SESSION_FILE).map(PathBuf::from),
        })
    }

    /// Local development stack (`supabase start` defaults)
    pub fn development(anon_key: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:54321/").expect("static URL is valid"),
            anon_key: anon_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
        }
    }
}

/// Parse the project URL so that relative joins append to its path
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key: ENV_PROVIDER_URL,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            key: ENV_PROVIDER_URL,
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
