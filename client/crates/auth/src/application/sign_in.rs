//! Sign In Use Case
//!
//! Authenticates with the provider and reports the user to the session store.

use crate::application::identity_client::IdentityClient;
use crate::application::session_store::SessionStore;
use crate::domain::entity::user::User;
use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<'a, P> {
    client: &'a IdentityClient<P>,
    store: &'a SessionStore,
}

impl<'a, P> SignInUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(client: &'a IdentityClient<P>, store: &'a SessionStore) -> Self {
        Self { client, store }
    }

    /// On failure the store is not touched
    pub async fn execute(&self, input: SignInInput) -> AuthResult<User> {
        let user = self.client.sign_in(&input.email, input.password).await?;

        self.store.set_user(Some(user.clone()));

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(user)
    }
}
