//! Auth (Identity & Session) Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, identity provider port
//! - `application/` - Identity Client, Session Store, sign-in/up/out flows
//! - `infra/` - GoTrue (hosted auth REST) adapter
//! - `presentation/` - Route table, route guard, flow outcomes for the view layer
//!
//! ## Session model
//! - One process-wide [`SessionStore`] owned by the application root
//! - `{ current_user, loading }`; `loading` is true only until the first lookup settles
//! - Every transition is visible to all subscribers before the call returns
//!
//! ## Guarding
//! - The route guard never redirects while the session is loading
//! - Unauthenticated access to a protected route redirects to `/login`, replacing history

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::identity_client::{AuthChanges, IdentityClient, map_user};
pub use application::session_store::{SessionState, SessionStore};
pub use domain::entity::user::User;
pub use domain::provider::{AuthChange, IdentityProvider};
pub use error::{AuthError, AuthResult};
pub use infra::gotrue::GoTrueProvider;
pub use presentation::middleware::{GuardDecision, RouteGuard};
pub use presentation::router::{Navigation, NavigationIntent, Route};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}
