//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::ProviderError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected the request or could not be reached
    #[error("Identity provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider reported success but returned no user object
    #[error("{0}")]
    MissingUser(&'static str),

    /// Caller input was missing or malformed; nothing was sent
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Provider(_) | AuthError::MissingUser(_) => ErrorKind::Auth,
            AuthError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Message a user may see (empty when the provider said nothing useful)
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Provider(e) => e.provider_message(),
            AuthError::MissingUser(msg) => (*msg).to_string(),
            AuthError::Validation(msg) => msg.clone(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.user_message())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        if self.kind().is_caller_error() {
            tracing::debug!(error = %self, "Auth input rejected");
            return;
        }

        match self {
            AuthError::Provider(ProviderError::Rejected { operation, status, message }) => {
                tracing::warn!(operation, status, message = %message, "Identity provider rejected request");
            }
            AuthError::Provider(e) => {
                tracing::error!(error = %e, "Identity provider failure");
            }
            AuthError::MissingUser(msg) => {
                tracing::error!(message = %msg, "Identity provider returned no user");
            }
            AuthError::Validation(_) => {}
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
