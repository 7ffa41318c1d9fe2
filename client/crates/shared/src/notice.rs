//! User notices
//!
//! A [`Notice`] is the short message shown after a flow finishes: the
//! equivalent of a toast in a browser front end.

use serde::Serialize;

use crate::error::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice carrying the error's own message, or `fallback` when empty
    pub fn from_error(err: &AppError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "✔ {}", self.message),
            NoticeLevel::Error => write!(f, "✘ {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_prefers_provider_message() {
        let err = AppError::auth("Invalid login credentials");
        let notice = Notice::from_error(&err, "Failed to login.");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Invalid login credentials");
    }

    #[test]
    fn test_from_error_falls_back() {
        let err = AppError::auth("");
        let notice = Notice::from_error(&err, "Failed to login.");
        assert_eq!(notice.message, "Failed to login.");
    }

    #[test]
    fn test_display() {
        assert_eq!(Notice::success("Logged out successfully!").to_string(), "✔ Logged out successfully!");
    }
}
