//! Domain Value Objects

use std::fmt;

use platform::crypto::{random_token, random_token_with};
use rand::Rng;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ReelError, ReelResult};

/// Length of a generated ReelID
pub const REEL_TOKEN_LEN: usize = 6;

/// Short public identifier of a reel
///
/// Generated tokens are `[0-9a-z]{6}`; stored ones are taken as they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelToken(String);

impl ReelToken {
    /// Token named in a path or typed by a user
    ///
    /// Older reels in the store do not all follow the generated format, so
    /// only emptiness is rejected here; the store decides whether it exists.
    pub fn lookup(raw: &str) -> ReelResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReelError::validation("Please provide a ReelID."));
        }
        Ok(Self(raw.to_string()))
    }

    /// Fresh random token
    pub fn generate() -> Self {
        Self(random_token(REEL_TOKEN_LEN))
    }

    /// Fresh token from a caller-supplied generator
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_token_with(rng, REEL_TOKEN_LEN))
    }

    /// Token read back from the store (not re-validated)
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReelToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Absolute http(s) URL a reel redirects to
///
/// Kept as typed (after trimming) so the stored value is exactly what the
/// owner entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectUrl(String);

impl RedirectUrl {
    pub fn new(raw: &str) -> ReelResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReelError::validation("Please provide a redirect URL."));
        }

        let url = Url::parse(raw)
            .map_err(|_| ReelError::validation("Please provide a valid redirect URL."))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ReelError::validation(
                "The redirect URL must start with http:// or https://",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::is_token_char;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generated_shape(token: &ReelToken) -> bool {
        token.as_str().len() == REEL_TOKEN_LEN && token.as_str().chars().all(is_token_char)
    }

    #[test]
    fn test_lookup_accepts_stored_formats() {
        assert_eq!(ReelToken::lookup(" x1k9 ").unwrap().as_str(), "x1k9");
        assert_eq!(
            ReelToken::lookup("6f1c2d3e-0000-4000-8000-000000000000").unwrap().as_str(),
            "6f1c2d3e-0000-4000-8000-000000000000"
        );

        let err = ReelToken::lookup("   ").unwrap_err();
        assert_eq!(err.to_string(), "Please provide a ReelID.");
    }

    #[test]
    fn test_generated_tokens_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let token = ReelToken::generate_with(&mut rng);
            assert!(generated_shape(&token), "{token}");
        }
        assert!(generated_shape(&ReelToken::generate()));
    }

    #[test]
    fn test_redirect_url() {
        let url = RedirectUrl::new("  https://example.com/redirect-here ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/redirect-here");
        assert!(RedirectUrl::new("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_redirect_url_rejections() {
        let err = RedirectUrl::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "Please provide a redirect URL.");

        assert!(RedirectUrl::new("example.com").is_err());
        assert!(RedirectUrl::new("ftp://example.com/file").is_err());
        assert!(RedirectUrl::new("javascript:alert(1)").is_err());
        assert!(RedirectUrl::new("mailto:a@b.com").is_err());
    }
}
