//! Application Configuration
//!
//! Configuration for the Reels application layer.

pub const ENV_SHARE_BASE_URL: &str = "SHARE_BASE_URL";

/// Reels application configuration
#[derive(Debug, Clone)]
pub struct ReelsConfig {
    /// Origin of the public redirect site; share links are `{share_base_url}/{token}`
    pub share_base_url: String,
    /// How many fresh tokens to try before giving up on a collision
    pub token_attempts: u32,
}

impl Default for ReelsConfig {
    fn default() -> Self {
        Self {
            share_base_url: "http://localhost:3000".to_string(),
            token_attempts: 5,
        }
    }
}

impl ReelsConfig {
    /// Defaults overridden by `SHARE_BASE_URL` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_SHARE_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            config.share_base_url = base;
        }
        config
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
