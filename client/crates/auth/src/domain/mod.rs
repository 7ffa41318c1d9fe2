//! Domain Layer
//!
//! Contains entities, value objects, and the identity provider port.

pub mod entity;
pub mod provider;
pub mod value_object;

// Re-exports
pub use entity::{provider_user::ProviderUser, user::User};
pub use provider::{AuthChange, IdentityProvider, LocalIdentityProvider, ProviderEvent};
