//! Flow Handlers
//!
//! Each handler runs one auth flow the way a login/sign-up/logout page does:
//! call the use case, then produce the notice to show and where to go next.
//! Errors never escape; they become error notices.

use std::sync::Arc;

use kernel::notice::Notice;

use crate::application::config::AuthConfig;
use crate::application::{
    IdentityClient, SessionStore, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::provider::IdentityProvider;
use crate::presentation::router::NavigationIntent;

/// Shared state for auth handlers
pub struct AuthAppState<P> {
    pub client: IdentityClient<P>,
    pub store: SessionStore,
    pub config: Arc<AuthConfig>,
}

impl<P> Clone for AuthAppState<P> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Result of a flow as the view layer consumes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T = ()> {
    pub notice: Notice,
    /// Where to go next; `None` means stay
    pub navigation: Option<NavigationIntent>,
    /// Flow payload on success
    pub value: Option<T>,
}

impl<T> Outcome<T> {
    fn success(notice: &str, to: &str, value: T) -> Self {
        Self {
            notice: Notice::success(notice),
            navigation: Some(NavigationIntent::push(to)),
            value: Some(value),
        }
    }

    fn failure(notice: Notice) -> Self {
        Self {
            notice,
            navigation: None,
            value: None,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.notice.is_error()
    }
}

// ============================================================================
// Sign Up
// ============================================================================

pub async fn sign_up<P>(state: &AuthAppState<P>, input: SignUpInput) -> Outcome<User>
where
    P: IdentityProvider,
{
    let messages = &state.config.messages;
    let use_case = SignUpUseCase::new(&state.client, &state.store);

    match use_case.execute(input).await {
        Ok(user) => Outcome::success(&messages.signed_up, &state.config.home_path, user),
        Err(e) => Outcome::failure(Notice::from_error(&e.to_app_error(), &messages.sign_up_failed)),
    }
}

// ============================================================================
// Sign In
// ============================================================================

pub async fn sign_in<P>(state: &AuthAppState<P>, input: SignInInput) -> Outcome<User>
where
    P: IdentityProvider,
{
    let messages = &state.config.messages;
    let use_case = SignInUseCase::new(&state.client, &state.store);

    match use_case.execute(input).await {
        Ok(user) => Outcome::success(&messages.signed_in, &state.config.home_path, user),
        Err(e) => Outcome::failure(Notice::from_error(&e.to_app_error(), &messages.sign_in_failed)),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

pub async fn sign_out<P>(state: &AuthAppState<P>) -> Outcome
where
    P: IdentityProvider,
{
    let messages = &state.config.messages;
    let use_case = SignOutUseCase::new(&state.client, &state.store);

    match use_case.execute().await {
        Ok(()) => Outcome::success(&messages.signed_out, &state.config.login_path, ()),
        Err(e) => Outcome::failure(Notice::from_error(&e.to_app_error(), &messages.sign_out_failed)),
    }
}
