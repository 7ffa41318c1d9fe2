//! Sign Up Use Case
//!
//! Registers an account and adopts the new user as the current one.

use crate::application::identity_client::IdentityClient;
use crate::application::session_store::SessionStore;
use crate::domain::entity::user::User;
use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Sign up use case
pub struct SignUpUseCase<'a, P> {
    client: &'a IdentityClient<P>,
    store: &'a SessionStore,
}

impl<'a, P> SignUpUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(client: &'a IdentityClient<P>, store: &'a SessionStore) -> Self {
        Self { client, store }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let user = self
            .client
            .sign_up(&input.email, input.password, &input.display_name)
            .await?;

        self.store.set_user(Some(user.clone()));

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(user)
    }
}
