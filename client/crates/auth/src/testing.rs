//! In-memory identity provider for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use platform::client::ProviderError;
use platform::password::ClearTextPassword;
use serde_json::{Map, Value};
use tokio::sync::{Notify, broadcast};

use crate::application::config::AuthConfig;
use crate::application::identity_client::IdentityClient;
use crate::domain::entity::provider_user::ProviderUser;
use crate::domain::provider::{IdentityProvider, ProviderEvent};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

struct Account {
    password: String,
    user: ProviderUser,
}

#[derive(Default)]
pub struct FakeProvider {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<ProviderUser>>,
    sign_in_gates: Mutex<HashMap<String, Arc<Notify>>>,
    lookup_gate: Mutex<Option<Arc<Notify>>>,
    fail_lookup: AtomicBool,
    fail_sign_out: AtomicBool,
    sign_in_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    next_id: AtomicUsize,
    events: Option<broadcast::Sender<ProviderEvent>>,
}

pub fn rejected(operation: &'static str, status: u16, message: &str) -> AuthError {
    AuthError::Provider(ProviderError::Rejected {
        operation,
        status,
        message: message.to_string(),
    })
}

impl FakeProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            events: Some(events),
            ..Default::default()
        }
    }

    /// Register an account directly (as if created earlier)
    pub fn with_account(self, email: &str, password: &str, name: &str) -> Self {
        let user = self.provider_user(email, name);
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user,
            },
        );
        self
    }

    /// Pretend a provider session for `email` already exists
    pub fn signed_in_as(self, email: &str) -> Self {
        let user = self.accounts.lock().unwrap().get(email).map(|a| a.user.clone());
        *self.current.lock().unwrap() = user;
        self
    }

    /// Hold sign-in for `email` until the returned handle is notified
    pub fn gate_sign_in(&self, email: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.sign_in_gates
            .lock()
            .unwrap()
            .insert(email.to_lowercase(), gate.clone());
        gate
    }

    /// Hold the current-user lookup until the returned handle is notified
    pub fn gate_lookup(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.lookup_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_lookup(&self) {
        self.fail_lookup.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Push a session change as if it happened in another tab
    pub fn emit(&self, event: ProviderEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    fn provider_user(&self, email: &str, name: &str) -> ProviderUser {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut user_metadata = Map::new();
        if !name.is_empty() {
            user_metadata.insert("full_name".to_string(), Value::String(name.to_string()));
        }
        ProviderUser {
            id: format!("user-{id}"),
            email: Some(email.to_string()),
            user_metadata,
        }
    }
}

impl IdentityProvider for FakeProvider {
    async fn sign_up(
        &self,
        email: &Email,
        password: &ClearTextPassword,
        metadata: Map<String, Value>,
    ) -> AuthResult<Option<ProviderUser>> {
        if password.expose().len() < 6 {
            return Err(rejected("sign up", 422, "Password should be at least 6 characters."));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = ProviderUser {
            id: format!("user-{id}"),
            email: Some(email.as_str().to_string()),
            user_metadata: metadata,
        };

        {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email.as_str()) {
                return Err(rejected("sign up", 422, "User already registered"));
            }
            accounts.insert(
                email.as_str().to_string(),
                Account {
                    password: password.expose().to_string(),
                    user: user.clone(),
                },
            );
        }

        *self.current.lock().unwrap() = Some(user.clone());
        self.emit(ProviderEvent::SignedIn(user.clone()));
        Ok(Some(user))
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<Option<ProviderUser>> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.sign_in_gates.lock().unwrap().get(email.as_str()).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let user = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email.as_str()) {
                Some(account) if account.password == password.expose() => account.user.clone(),
                _ => return Err(rejected("sign in", 400, "Invalid login credentials")),
            }
        };

        *self.current.lock().unwrap() = Some(user.clone());
        self.emit(ProviderEvent::SignedIn(user.clone()));
        Ok(Some(user))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(rejected("sign out", 500, ""));
        }
        *self.current.lock().unwrap() = None;
        self.emit(ProviderEvent::SignedOut);
        Ok(())
    }

    async fn get_user(&self) -> AuthResult<Option<ProviderUser>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.lookup_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(rejected("get user", 503, "Service unavailable"));
        }
        Ok(self.current.lock().unwrap().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        match &self.events {
            Some(events) => events.subscribe(),
            None => broadcast::channel(1).1,
        }
    }
}

pub fn client(provider: &Arc<FakeProvider>) -> IdentityClient<FakeProvider> {
    IdentityClient::new(provider.clone(), Arc::new(AuthConfig::default()))
}
