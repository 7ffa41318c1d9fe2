//! Route Guard
//!
//! Decides, on every navigation to a protected page, whether it may render.
//! A pure function of the session snapshot:
//!
//! ```text
//! LOADING ──► AUTHORIZED    (user present: render)
//!     └─────► UNAUTHORIZED  (no user: replace to login)
//! ```
//!
//! While loading nothing is decided, so a returning user never sees the login
//! page flash up before their session resolves.

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionState;
use crate::presentation::router::NavigationIntent;

/// Guard outcome for one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded content
    Allow,
    /// Session not resolved yet: show a neutral placeholder
    Pending,
    /// Leave for the unauthenticated entry point
    Redirect(NavigationIntent),
}

impl GuardDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

/// Route guard
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
}

impl RouteGuard {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
        }
    }

    pub fn evaluate(&self, session: &SessionState) -> GuardDecision {
        if session.loading {
            return GuardDecision::Pending;
        }

        if session.current_user.is_none() {
            tracing::debug!(to = %self.login_path, "Unauthenticated access to protected route");
            return GuardDecision::Redirect(NavigationIntent::replace(self.login_path.as_str()));
        }

        GuardDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}
