//! Identity Provider Port
//!
//! Interface to the hosted identity provider. Implementation is in the
//! infrastructure layer.

use platform::password::ClearTextPassword;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::domain::entity::{provider_user::ProviderUser, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Session change as the provider reports it
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    SignedIn(ProviderUser),
    SignedOut,
}

/// Session change in canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(User),
    SignedOut,
}

impl AuthChange {
    /// The user the session should hold after this change
    pub fn into_user(self) -> Option<User> {
        match self {
            AuthChange::SignedIn(user) => Some(user),
            AuthChange::SignedOut => None,
        }
    }
}

/// Identity provider trait
///
/// Every call is single-shot. `Ok(None)` from sign-up or sign-in means the
/// provider accepted the request but returned no user object.
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Register a new account; `metadata` is stored on the provider user
    async fn sign_up(
        &self,
        email: &Email,
        password: &ClearTextPassword,
        metadata: Map<String, Value>,
    ) -> AuthResult<Option<ProviderUser>>;

    /// Exchange credentials for a provider session
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<Option<ProviderUser>>;

    /// Invalidate the provider session
    async fn sign_out(&self) -> AuthResult<()>;

    /// User behind the held provider session, if any
    async fn get_user(&self) -> AuthResult<Option<ProviderUser>>;

    /// Session change notifications published from now on
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}
