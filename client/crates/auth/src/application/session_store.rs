//! Session Store
//!
//! Process-wide "who is logged in" state, owned by the application root and
//! handed to everything else as a cheap clone.
//!
//! ## Lifecycle
//! - [`SessionStore::start`] publishes `{None, loading}` and runs one
//!   current-user lookup; its completion settles the store.
//! - [`SessionStore::set_user`] is how flows report sign-in/up/out outcomes.
//! - [`SessionStore::teardown`] stops background work and clears the user.
//!
//! Transitions land in completion order. Two concurrent sign-ins are not
//! serialized: whichever reports last is what the store holds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::application::identity_client::{AuthChanges, IdentityClient};
use crate::domain::entity::user::User;
use crate::domain::provider::IdentityProvider;

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    /// State before the first lookup settles
    pub fn initial() -> Self {
        Self {
            current_user: None,
            loading: true,
        }
    }

    /// Settled state holding `user`
    pub fn settled(user: Option<User>) -> Self {
        Self {
            current_user: user,
            loading: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

struct Inner {
    state: watch::Sender<SessionState>,
    torn_down: AtomicBool,
    tasks: Mutex<Vec<AbortHandle>>,
}

/// Shared session store (clones share one state)
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Store in the loading state with no lookup running
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            inner: Arc::new(Inner {
                state,
                torn_down: AtomicBool::new(false),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create the store and issue the single initial current-user lookup
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<P>(client: &IdentityClient<P>) -> Self
    where
        P: IdentityProvider + Send + Sync + 'static,
    {
        let store = Self::new();
        let client = client.clone();
        let weak = Arc::downgrade(&store.inner);

        let handle = tokio::spawn(async move {
            let user = client.current_user().await;
            if let Some(store) = upgrade(&weak) {
                store.resolve(user);
            }
        });
        store.track(handle.abort_handle());

        store
    }

    /// Apply provider session changes as they arrive
    pub fn follow(&self, mut changes: AuthChanges) {
        let weak = Arc::downgrade(&self.inner);

        let handle = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                let Some(store) = upgrade(&weak) else {
                    break;
                };
                tracing::debug!(?change, "Applying provider session change");
                store.set_user(change.into_user());
            }
        });
        self.track(handle.abort_handle());
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every transition from now on
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Wait until the initial lookup has settled
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so this cannot happen while we are borrowed
            Err(_) => self.snapshot(),
        }
    }

    /// Assign the current user; `loading` is left alone
    pub fn set_user(&self, user: Option<User>) {
        self.transition(|state| state.current_user = user);
    }

    /// Stop background work and clear the user
    ///
    /// Later transitions (including a lookup that was already on the wire)
    /// are discarded.
    pub fn teardown(&self) {
        self.inner.torn_down.store(true, Ordering::SeqCst);

        let tasks = std::mem::take(
            &mut *self
                .inner
                .tasks
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for task in tasks {
            task.abort();
        }

        self.inner.state.send_replace(SessionState::settled(None));
        tracing::debug!("Session store torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::SeqCst)
    }

    /// Completion of the initial lookup
    fn resolve(&self, user: Option<User>) {
        let authenticated = user.is_some();
        if self.transition(|state| *state = SessionState::settled(user)) {
            tracing::debug!(authenticated, "Session resolved");
        }
    }

    /// Apply `update` unless the store has been torn down
    ///
    /// The flag is read under the channel's write lock, so a transition racing
    /// `teardown` either lands before the teardown state or not at all.
    fn transition(&self, update: impl FnOnce(&mut SessionState)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.inner.torn_down.load(Ordering::SeqCst) {
                return false;
            }
            update(state);
            true
        })
    }

    fn track(&self, handle: AbortHandle) {
        let mut tasks = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upgrade(weak: &Weak<Inner>) -> Option<SessionStore> {
    weak.upgrade().map(|inner| SessionStore { inner })
}
