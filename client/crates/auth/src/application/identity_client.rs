//! Identity Client
//!
//! The four identity operations over an [`IdentityProvider`]. Input is checked
//! before anything is sent, provider users are mapped to [`User`] in exactly
//! one place, and nothing is retried.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use serde_json::{Map, Value};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::application::config::AuthConfig;
use crate::domain::entity::{provider_user::ProviderUser, user::User};
use crate::domain::provider::{AuthChange, IdentityProvider, ProviderEvent};
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::{AuthError, AuthResult};

/// Map the provider's user object to the canonical [`User`]
///
/// Missing email and missing (or non-string) display name both become `""`.
pub fn map_user(raw: &ProviderUser, display_name_key: &str) -> User {
    User::new(
        raw.id.as_str(),
        raw.email.clone().unwrap_or_default(),
        raw.metadata_str(display_name_key).unwrap_or_default(),
    )
}

/// Identity client
pub struct IdentityClient<P> {
    provider: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> Clone for IdentityClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P> IdentityClient<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register and return the new user
    pub async fn sign_up(&self, email: &str, password: String, display_name: &str) -> AuthResult<User> {
        let email = parse_email(email)?;
        let password = parse_password(password)?;
        let name = DisplayName::new(display_name);

        let mut metadata = Map::new();
        metadata.insert(
            self.config.display_name_key.clone(),
            Value::String(name.into_inner()),
        );

        let raw = self
            .provider
            .sign_up(&email, &password, metadata)
            .await
            .inspect_err(AuthError::log)?
            .ok_or(AuthError::MissingUser("User not created"))
            .inspect_err(AuthError::log)?;

        Ok(map_user(&raw, &self.config.display_name_key))
    }

    /// Authenticate with email and password
    pub async fn sign_in(&self, email: &str, password: String) -> AuthResult<User> {
        let email = parse_email(email)?;
        let password = parse_password(password)?;

        let raw = self
            .provider
            .sign_in_with_password(&email, &password)
            .await
            .inspect_err(AuthError::log)?
            .ok_or(AuthError::MissingUser("User not found"))
            .inspect_err(AuthError::log)?;

        Ok(map_user(&raw, &self.config.display_name_key))
    }

    /// Invalidate the provider session; the caller clears the Session Store
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await.inspect_err(AuthError::log)
    }

    /// Current user, or `None` when there is no usable provider session
    ///
    /// Never fails: provider errors are logged and read as "nobody".
    pub async fn current_user(&self) -> Option<User> {
        match self.provider.get_user().await {
            Ok(raw) => raw.map(|raw| map_user(&raw, &self.config.display_name_key)),
            Err(e) => {
                tracing::warn!(error = %e, "Current user lookup failed, treating as signed out");
                None
            }
        }
    }

    /// Provider session changes, mapped to canonical form
    pub fn on_auth_change(&self) -> AuthChanges {
        AuthChanges {
            events: self.provider.subscribe(),
            display_name_key: self.config.display_name_key.clone(),
        }
    }
}

fn parse_email(raw: &str) -> AuthResult<Email> {
    Email::new(raw).map_err(|e| AuthError::Validation(e.message().to_string()))
}

fn parse_password(raw: String) -> AuthResult<ClearTextPassword> {
    ClearTextPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))
}

/// Stream of canonical session changes
pub struct AuthChanges {
    events: broadcast::Receiver<ProviderEvent>,
    display_name_key: String,
}

impl AuthChanges {
    /// Next change; `None` once the provider is gone
    ///
    /// Lagging behind only loses intermediate changes: the provider's most
    /// recent events are still delivered.
    pub async fn next(&mut self) -> Option<AuthChange> {
        loop {
            match self.events.recv().await {
                Ok(ProviderEvent::SignedIn(raw)) => {
                    return Some(AuthChange::SignedIn(map_user(&raw, &self.display_name_key)));
                }
                Ok(ProviderEvent::SignedOut) => return Some(AuthChange::SignedOut),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth change subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> ProviderUser {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_user_full() {
        let user = map_user(
            &raw(json!({"id": "u1", "email": "a@b.com", "user_metadata": {"full_name": "Ann"}})),
            "full_name",
        );
        assert_eq!(user, User::new("u1", "a@b.com", "Ann"));
    }

    #[test]
    fn test_map_user_defaults() {
        let user = map_user(&raw(json!({"id": "u1"})), "full_name");
        assert_eq!(user, User::new("u1", "", ""));

        let user = map_user(
            &raw(json!({"id": "u1", "email": null, "user_metadata": {"full_name": 7}})),
            "full_name",
        );
        assert_eq!(user.email, "");
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_map_user_honours_key() {
        let user = map_user(
            &raw(json!({"id": "u1", "user_metadata": {"full_name": "Ann", "nick": "annie"}})),
            "nick",
        );
        assert_eq!(user.name, "annie");
    }

    #[tokio::test]
    async fn test_auth_changes_skip_lag_and_end_on_close() {
        let (tx, rx) = broadcast::channel(1);
        let mut changes = AuthChanges {
            events: rx,
            display_name_key: "full_name".to_string(),
        };

        tx.send(ProviderEvent::SignedOut).unwrap();
        tx.send(ProviderEvent::SignedIn(raw(json!({"id": "u1"})))).unwrap();
        drop(tx);

        assert_eq!(
            changes.next().await,
            Some(AuthChange::SignedIn(User::new("u1", "", "")))
        );
        assert_eq!(changes.next().await, None);
    }
}
