//! Sign Out Use Case

use crate::application::identity_client::IdentityClient;
use crate::application::session_store::SessionStore;
use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<'a, P> {
    client: &'a IdentityClient<P>,
    store: &'a SessionStore,
}

impl<'a, P> SignOutUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(client: &'a IdentityClient<P>, store: &'a SessionStore) -> Self {
        Self { client, store }
    }

    /// The user is cleared only after the provider confirms
    pub async fn execute(&self) -> AuthResult<()> {
        self.client.sign_out().await?;

        let previous = self.store.snapshot().current_user;
        self.store.set_user(None);

        tracing::info!(
            user_id = previous.as_ref().map(|u| u.id.as_str()),
            "User signed out"
        );

        Ok(())
    }
}
