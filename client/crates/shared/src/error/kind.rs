//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by the identity, data and view layers.

use serde::Serialize;

/// Error classification
///
/// Every crate-specific error maps onto exactly one of these kinds. The kind
/// decides how a failure is reported, not whether it is fatal: apart from
/// [`ErrorKind::Configuration`] at start-up, every kind ends up as a notice.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert_eq!(kind.as_str(), "Validation");
/// assert!(kind.is_caller_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// The identity provider rejected or failed a request
    Auth,
    /// A data store operation failed
    DataAccess,
    /// Caller-supplied input was missing or malformed
    Validation,
    /// The process is misconfigured (missing endpoint, bad key)
    Configuration,
}

impl ErrorKind {
    /// Stable name of the kind
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Auth => "Auth",
            ErrorKind::DataAccess => "DataAccess",
            ErrorKind::Validation => "Validation",
            ErrorKind::Configuration => "Configuration",
        }
    }

    /// Whether the failure was caused by the caller's input
    ///
    /// Caller errors are reported without being logged as failures.
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, ErrorKind::Validation)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(ErrorKind::Auth.as_str(), "Auth");
        assert_eq!(ErrorKind::DataAccess.as_str(), "DataAccess");
        assert_eq!(ErrorKind::Validation.as_str(), "Validation");
        assert_eq!(ErrorKind::Configuration.as_str(), "Configuration");
    }

    #[test]
    fn test_caller_error() {
        assert!(ErrorKind::Validation.is_caller_error());
        assert!(!ErrorKind::Auth.is_caller_error());
        assert!(!ErrorKind::DataAccess.is_caller_error());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::DataAccess).unwrap();
        assert_eq!(json, "\"DATA_ACCESS\"");
    }
}
