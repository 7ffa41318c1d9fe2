//! View-scoped tasks
//!
//! A view starts fetches when it opens and may close before they finish. The
//! fetch itself keeps running (provider calls are not cancellable), but once
//! the owning [`ViewScope`] is closed its results are discarded on arrival
//! instead of being applied to a view that no longer exists.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

/// Lifetime of one view; clones share it
#[derive(Clone)]
pub struct ViewScope {
    view: &'static str,
    open: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Tear the view down; every task spawned in it becomes discard-on-arrival
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            tracing::debug!(view = self.view, "View scope closed");
        }
    }

    /// Run `future` on the runtime, tied to this scope
    pub fn spawn<F>(&self, future: F) -> ScopedTask<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        ScopedTask {
            handle: tokio::spawn(future),
            scope: self.clone(),
        }
    }
}

/// Handle to a fetch started inside a [`ViewScope`]
pub struct ScopedTask<T> {
    handle: JoinHandle<T>,
    scope: ViewScope,
}

impl<T> ScopedTask<T> {
    /// Wait for the result; `None` if the scope closed first or the task panicked
    pub async fn join(self) -> Option<T> {
        let result = self.handle.await;

        if !self.scope.is_open() {
            tracing::debug!(view = self.scope.view, "Discarding result for closed view");
            return None;
        }

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(view = self.scope.view, error = %e, "View task failed");
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_open_scope_delivers() {
        let scope = ViewScope::new("reels");
        let task = scope.spawn(async { 42 });
        assert_eq!(task.join().await, Some(42));
    }

    #[tokio::test]
    async fn test_closed_scope_discards_late_result() {
        let scope = ViewScope::new("submissions");
        let (tx, rx) = oneshot::channel::<()>();

        let task = scope.spawn(async move {
            let _ = rx.await;
            "late"
        });

        scope.close();
        tx.send(()).unwrap();

        assert_eq!(task.join().await, None);
        assert!(!scope.is_open());
    }

    #[tokio::test]
    async fn test_clones_share_lifetime() {
        let scope = ViewScope::new("create");
        let clone = scope.clone();
        clone.close();
        assert!(!scope.is_open());
        assert_eq!(scope.spawn(async { 1 }).join().await, None);
    }

    fn should_fail() -> bool {
        true
    }

    #[tokio::test]
    async fn test_panicking_task_yields_none() {
        let scope = ViewScope::new("reels");
        let task = scope.spawn(async {
            if should_fail() {
                panic!("fetch blew up");
            }
            0
        });
        assert_eq!(task.join().await, None);
    }
}
