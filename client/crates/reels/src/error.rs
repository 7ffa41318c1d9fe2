//! Reel Error Types
//!
//! This module provides reel-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::ProviderError;
use thiserror::Error;

/// Reel-specific result type alias
pub type ReelResult<T> = Result<T, ReelError>;

/// Reel-specific error variants
#[derive(Debug, Error)]
pub enum ReelError {
    /// The data store rejected the request or could not be reached
    #[error("Data store error: {0}")]
    Store(#[from] ProviderError),

    /// Caller input was missing or malformed; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// An owner-scoped operation ran without a signed-in user
    #[error("You must be logged in to create a ReelID.")]
    NotSignedIn,

    /// Every generated token was already taken
    #[error("Could not allocate a unique ReelID.")]
    TokenExhausted { attempts: u32 },
}

impl ReelError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReelError::Validation(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReelError::Store(_) | ReelError::TokenExhausted { .. } => ErrorKind::DataAccess,
            ReelError::Validation(_) | ReelError::NotSignedIn => ErrorKind::Validation,
        }
    }

    /// Message a user may see (empty when the store said nothing useful)
    pub fn user_message(&self) -> String {
        match self {
            ReelError::Store(e) => e.provider_message(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.user_message())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        if self.kind().is_caller_error() {
            tracing::debug!(error = %self, "Reel request rejected");
            return;
        }

        match self {
            ReelError::Store(ProviderError::Rejected { operation, status, message }) => {
                tracing::warn!(operation, status, message = %message, "Data store rejected request");
            }
            ReelError::Store(e) => {
                tracing::error!(error = %e, "Data store failure");
            }
            ReelError::TokenExhausted { attempts } => {
                tracing::error!(attempts, "No free ReelID token found");
            }
            ReelError::Validation(_) | ReelError::NotSignedIn => {}
        }
    }
}

impl From<ReelError> for AppError {
    fn from(err: ReelError) -> Self {
        err.to_app_error()
    }
}
