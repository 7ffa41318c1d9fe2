//! Application Layer
//!
//! Identity client, session store, and the sign-in/up/out use cases that
//! connect the two.

pub mod config;
pub mod identity_client;
pub mod session_store;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use identity_client::{AuthChanges, IdentityClient};
pub use session_store::{SessionState, SessionStore};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
