// src/signal.rs

//! One-shot signal used to simulate a process that is still running.
//!
//! [`new_signal`] returns a [`Waiter`] / [`Resolver`] pair. Any number of
//! clones of either half may exist; the signal flips from pending to resolved
//! exactly once and never flips back.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Create a fresh, unresolved signal.
pub fn new_signal() -> (Waiter, Resolver) {
    let (tx, rx) = watch::channel(false);
    (Waiter { rx }, Resolver { tx: Arc::new(tx) })
}

/// Blocking half of a signal.
#[derive(Clone)]
pub struct Waiter {
    rx: watch::Receiver<bool>,
}

impl Waiter {
    /// Wait until the signal is resolved.
    ///
    /// If every `Resolver` is dropped without resolving, this never returns.
    pub async fn wait(&self) {
        let mut rx = self.rx.clone();
        let closed = rx.wait_for(|resolved| *resolved).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    pub fn is_resolved(&self) -> bool {
        *self.rx.borrow()
    }
}

impl fmt::Debug for Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waiter")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Resolving half of a signal.
#[derive(Clone)]
pub struct Resolver {
    tx: Arc<watch::Sender<bool>>,
}

impl Resolver {
    /// Resolve the signal, waking every waiter.
    ///
    /// Returns `true` only for the call that performed the resolution.
    pub fn resolve(&self) -> bool {
        self.tx.send_if_modified(|resolved| {
            if *resolved {
                false
            } else {
                *resolved = true;
                true
            }
        })
    }

    pub fn is_resolved(&self) -> bool {
        *self.tx.borrow()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolve_wakes_waiter() {
        let (waiter, resolver) = new_signal();
        assert!(!waiter.is_resolved());

        let handle = tokio::spawn({
            let waiter = waiter.clone();
            async move { waiter.wait().await }
        });

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(resolver.resolve());

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should wake")
            .expect("waiter task panicked");
        assert!(waiter.is_resolved());
    }

    #[test]
    fn only_first_resolve_counts() {
        let (waiter, resolver) = new_signal();
        let other = resolver.clone();

        assert!(resolver.resolve());
        assert!(!other.resolve());
        assert!(!resolver.resolve());
        assert!(waiter.is_resolved());
    }

    #[tokio::test]
    async fn wait_after_resolution_returns_immediately() {
        let (waiter, resolver) = new_signal();
        resolver.resolve();
        tokio::time::timeout(Duration::from_millis(100), waiter.wait())
            .await
            .expect("already-resolved signal should not block");
    }

    #[tokio::test]
    async fn dropped_resolver_leaves_waiter_pending() {
        let (waiter, resolver) = new_signal();
        drop(resolver);
        let res = tokio::time::timeout(Duration::from_millis(20), waiter.wait()).await;
        assert!(res.is_err());
    }
}
