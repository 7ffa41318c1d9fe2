//! GoTrue Identity Provider
//!
//! Adapter over the hosted auth REST API (`/auth/v1`). Provider session tokens
//! stay in [`SessionTokens`]; callers only ever see [`ProviderUser`].

use platform::client::{ProviderClient, ProviderError};
use platform::password::ClearTextPassword;
use platform::session::ProviderSession;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::sync::broadcast;

use crate::application::config::AuthConfig;
use crate::domain::entity::provider_user::ProviderUser;
use crate::domain::provider::{IdentityProvider, ProviderEvent};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

const SIGNUP_PATH: &str = "auth/v1/signup";
const TOKEN_PATH: &str = "auth/v1/token";
const LOGOUT_PATH: &str = "auth/v1/logout";
const USER_PATH: &str = "auth/v1/user";

/// Token grant body returned by sign-in (and by sign-up when no confirmation is required)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<ProviderUser>,
}

impl TokenResponse {
    fn into_parts(self) -> (ProviderSession, Option<ProviderUser>) {
        (
            ProviderSession {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
            },
            self.user,
        )
    }
}

/// What a sign-up call produced
#[derive(Debug)]
enum SignUpGrant {
    /// Account created and signed in
    Session(ProviderSession, Option<ProviderUser>),
    /// Account created, email confirmation pending (no session yet)
    Unconfirmed(ProviderUser),
    /// Success status without a user object
    Empty,
}

/// Sign-up answers with either a token grant or the bare user
fn parse_sign_up(body: Value) -> Result<SignUpGrant, ProviderError> {
    let decode = |e: serde_json::Error| ProviderError::Decode {
        operation: "sign up",
        detail: e.to_string(),
    };

    if body.get("access_token").is_some() {
        let grant: TokenResponse = serde_json::from_value(body).map_err(decode)?;
        let (session, user) = grant.into_parts();
        return Ok(SignUpGrant::Session(session, user));
    }

    if body.get("id").is_some() {
        return Ok(SignUpGrant::Unconfirmed(
            serde_json::from_value(body).map_err(decode)?,
        ));
    }

    Ok(SignUpGrant::Empty)
}

/// GoTrue-backed identity provider
#[derive(Clone)]
pub struct GoTrueProvider {
    client: ProviderClient,
    events: broadcast::Sender<ProviderEvent>,
}

impl GoTrueProvider {
    pub fn new(client: ProviderClient, config: &AuthConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self { client, events }
    }

    fn publish(&self, event: ProviderEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Keep a granted session only when it names a user
    async fn adopt(&self, session: ProviderSession, user: Option<ProviderUser>) -> Option<ProviderUser> {
        let Some(user) = user else {
            tracing::debug!("Token grant without a user; session not kept");
            return None;
        };

        self.client.session().store(session).await;
        self.publish(ProviderEvent::SignedIn(user.clone()));
        Some(user)
    }

    async fn forget(&self) {
        self.client.session().clear().await;
        self.publish(ProviderEvent::SignedOut);
    }
}

impl IdentityProvider for GoTrueProvider {
    async fn sign_up(
        &self,
        email: &Email,
        password: &ClearTextPassword,
        metadata: Map<String, Value>,
    ) -> AuthResult<Option<ProviderUser>> {
        let request = self
            .client
            .request(Method::POST, SIGNUP_PATH)
            .await?
            .json(&json!({
                "email": email.as_str(),
                "password": password.expose(),
                "data": metadata,
            }));

        let body: Value = self.client.send_json(request, "sign up").await?;

        match parse_sign_up(body)? {
            SignUpGrant::Session(session, user) => Ok(self.adopt(session, user).await),
            SignUpGrant::Unconfirmed(user) => {
                tracing::debug!(user_id = %user.id, "Sign-up pending email confirmation");
                Ok(Some(user))
            }
            SignUpGrant::Empty => Ok(None),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<Option<ProviderUser>> {
        let request = self
            .client
            .request(Method::POST, TOKEN_PATH)
            .await?
            .query(&[("grant_type", "password")])
            .json(&json!({
                "email": email.as_str(),
                "password": password.expose(),
            }));

        let grant: TokenResponse = self.client.send_json(request, "sign in").await?;
        let (session, user) = grant.into_parts();

        Ok(self.adopt(session, user).await)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        if !self.client.session().is_present().await {
            self.forget().await;
            return Ok(());
        }

        let request = self.client.request(Method::POST, LOGOUT_PATH).await?;
        match self.client.send(request, "sign out").await {
            Ok(_) => {}
            // The provider already considers this session gone
            Err(e) if matches!(e.status(), Some(401 | 403 | 404)) => {
                tracing::debug!(error = %e, "Provider session already invalid");
            }
            Err(e) => return Err(e.into()),
        }

        self.forget().await;
        Ok(())
    }

    async fn get_user(&self) -> AuthResult<Option<ProviderUser>> {
        if !self.client.session().is_present().await {
            return Ok(None);
        }

        let request = self.client.request(Method::GET, USER_PATH).await?;
        match self.client.send_json::<ProviderUser>(request, "get user").await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => {
                tracing::debug!(error = %e, "Stored provider session rejected");
                self.client.session().clear().await;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::config::ProviderConfig;
    use platform::session::SessionTokens;

    fn provider() -> GoTrueProvider {
        let config = ProviderConfig::development("anon");
        let client = ProviderClient::new(&config, SessionTokens::in_memory()).unwrap();
        GoTrueProvider::new(client, &AuthConfig::default())
    }

    #[test]
    fn test_parse_sign_up_with_session() {
        let body = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "refresh_token": "r1",
            "user": {"id": "u1", "email": "a@b.com", "user_metadata": {"full_name": "Ann"}}
        });

        match parse_sign_up(body).unwrap() {
            SignUpGrant::Session(session, Some(user)) => {
                assert_eq!(session.access_token, "jwt");
                assert_eq!(session.refresh_token.as_deref(), Some("r1"));
                assert_eq!(user.id, "u1");
            }
            other => panic!("unexpected grant: {other:?}"),
        }
    }

    #[test]
    fn test_parse_sign_up_unconfirmed() {
        let body = json!({"id": "u1", "email": "a@b.com", "confirmation_sent_at": "2024-01-01T00:00:00Z"});
        assert!(matches!(
            parse_sign_up(body).unwrap(),
            SignUpGrant::Unconfirmed(user) if user.email.as_deref() == Some("a@b.com")
        ));
    }

    #[test]
    fn test_parse_sign_up_empty_and_malformed() {
        assert!(matches!(parse_sign_up(json!({})).unwrap(), SignUpGrant::Empty));

        let err = parse_sign_up(json!({"access_token": 5})).unwrap_err();
        assert!(matches!(err, ProviderError::Decode { operation: "sign up", .. }));
    }

    #[tokio::test]
    async fn test_no_session_means_no_user_without_network() {
        // The development URL is never contacted: no token is held
        let provider = provider();
        assert_eq!(provider.get_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_without_session_publishes_signed_out() {
        let provider = provider();
        let mut events = provider.subscribe();

        provider.sign_out().await.unwrap();

        assert_eq!(events.recv().await.unwrap(), ProviderEvent::SignedOut);
    }

    mod http {
        use super::*;
        use platform::testing::{StubProvider, StubResponse};
        use tokio::sync::broadcast::error::TryRecvError;

        fn against(stub: &StubProvider) -> GoTrueProvider {
            let client = ProviderClient::new(&stub.config(), SessionTokens::in_memory()).unwrap();
            GoTrueProvider::new(client, &AuthConfig::default())
        }

        async fn signed_in(stub: &StubProvider) -> GoTrueProvider {
            let provider = against(stub);
            provider
                .client
                .session()
                .store(ProviderSession {
                    access_token: "jwt".to_string(),
                    refresh_token: None,
                })
                .await;
            provider
        }

        fn credentials() -> (Email, ClearTextPassword) {
            (
                Email::new("a@b.com").unwrap(),
                ClearTextPassword::new("secret1".to_string()).unwrap(),
            )
        }

        #[tokio::test]
        async fn test_password_grant_keeps_session_and_announces_user() {
            let stub = StubProvider::start([StubResponse::json(
                200,
                json!({
                    "access_token": "jwt",
                    "refresh_token": "r1",
                    "user": {"id": "u1", "email": "a@b.com"}
                }),
            )])
            .await
            .unwrap();
            let provider = against(&stub);
            let mut events = provider.subscribe();
            let (email, password) = credentials();

            let user = provider.sign_in_with_password(&email, &password).await.unwrap().unwrap();

            assert_eq!(user.id, "u1");
            assert_eq!(provider.client.session().access_token().await.as_deref(), Some("jwt"));
            assert!(matches!(events.recv().await.unwrap(), ProviderEvent::SignedIn(u) if u.id == "u1"));

            let requests = stub.requests();
            assert_eq!(requests.len(), 1);
            let req = &requests[0];
            assert_eq!(req.method, "POST");
            assert_eq!(req.target, "/auth/v1/token?grant_type=password");
            assert_eq!(req.header("apikey"), Some("anon"));
            assert_eq!(req.header("authorization"), Some("Bearer anon"));
            assert_eq!(req.json(), json!({"email": "a@b.com", "password": "secret1"}));
        }

        #[tokio::test]
        async fn test_grant_without_user_is_not_kept() {
            let stub = StubProvider::start([StubResponse::json(200, json!({"access_token": "jwt"}))])
                .await
                .unwrap();
            let provider = against(&stub);
            let mut events = provider.subscribe();
            let (email, password) = credentials();

            assert_eq!(provider.sign_in_with_password(&email, &password).await.unwrap(), None);
            assert!(!provider.client.session().is_present().await);
            assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
        }

        #[tokio::test]
        async fn test_rejected_stored_session_is_cleared() {
            for status in [401, 403] {
                let stub = StubProvider::start([StubResponse::json(
                    status,
                    json!({"msg": "invalid JWT"}),
                )])
                .await
                .unwrap();
                let provider = signed_in(&stub).await;

                assert_eq!(provider.get_user().await.unwrap(), None, "status {status}");
                assert!(!provider.client.session().is_present().await);

                let requests = stub.requests();
                assert_eq!(requests[0].target, "/auth/v1/user");
                assert_eq!(requests[0].header("authorization"), Some("Bearer jwt"));
            }
        }

        #[tokio::test]
        async fn test_get_user_keeps_session_on_server_error() {
            let stub = StubProvider::start([StubResponse::json(500, json!({"msg": "down"}))])
                .await
                .unwrap();
            let provider = signed_in(&stub).await;

            assert!(provider.get_user().await.is_err());
            assert!(provider.client.session().is_present().await);
        }

        #[tokio::test]
        async fn test_sign_out_of_session_the_provider_already_dropped() {
            for status in [401, 403, 404] {
                let stub = StubProvider::start([StubResponse::empty(status)]).await.unwrap();
                let provider = signed_in(&stub).await;
                let mut events = provider.subscribe();

                provider.sign_out().await.unwrap();

                assert!(!provider.client.session().is_present().await, "status {status}");
                assert_eq!(events.recv().await.unwrap(), ProviderEvent::SignedOut);
                assert_eq!(stub.requests()[0].target, "/auth/v1/logout");
            }
        }

        #[tokio::test]
        async fn test_failed_sign_out_keeps_session() {
            let stub = StubProvider::start([StubResponse::json(500, json!({"msg": "down"}))])
                .await
                .unwrap();
            let provider = signed_in(&stub).await;
            let mut events = provider.subscribe();

            assert!(provider.sign_out().await.is_err());
            assert!(provider.client.session().is_present().await);
            assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
        }
    }
}
