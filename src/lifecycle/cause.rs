//! Cancellation with a recorded cause.
//!
//! The inner half of the lifecycle context: a child of the signal token
//! that the runner can additionally cancel with an explicit failure.
//! The recorded cause distinguishes the two triggers — none after
//! completion means a signal arrived, a recorded error means the
//! listener failed.

use std::sync::Arc;
use std::sync::OnceLock;

use tokio_util::sync::CancellationToken;

use crate::error::ListenerError;

/// A cancellable scope carrying an optional failure cause.
///
/// Cancels when its parent cancels (signal path, no cause) or when
/// [`CauseToken::fail`] records a cause. First writer wins: the cause
/// slot is a compare-and-set, and every later cancellation attempt is a
/// no-op. Clones share the same scope and slot.
#[derive(Debug, Clone)]
pub struct CauseToken {
    token: CancellationToken,
    cause: Arc<OnceLock<ListenerError>>,
}

impl CauseToken {
    /// Derive a cause-carrying child of the given token.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            cause: Arc::new(OnceLock::new()),
        }
    }

    /// Cancel with the given cause, if nothing cancelled this scope yet.
    ///
    /// Safe to call concurrently; exactly one cause is ever retained.
    pub fn fail(&self, err: ListenerError) {
        if self.token.is_cancelled() {
            return;
        }
        if self.cause.set(err).is_ok() {
            self.token.cancel();
        }
    }

    /// Completes once a signal arrived or a cause was recorded.
    pub async fn done(&self) {
        self.token.cancelled().await;
    }

    /// The recorded failure cause, if cancellation was explicit.
    pub fn cause(&self) -> Option<ListenerError> {
        self.cause.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn parent_cancellation_completes_without_cause() {
        let parent = CancellationToken::new();
        let lifecycle = CauseToken::child_of(&parent);

        parent.cancel();
        lifecycle.done().await;
        assert!(lifecycle.cause().is_none());
    }

    #[tokio::test]
    async fn explicit_failure_records_cause() {
        let parent = CancellationToken::new();
        let lifecycle = CauseToken::child_of(&parent);

        lifecycle.fail(ListenerError::Other("boom".into()));
        lifecycle.done().await;
        assert!(matches!(lifecycle.cause(), Some(ListenerError::Other(msg)) if msg == "boom"));
    }

    #[tokio::test]
    async fn fail_after_parent_cancel_is_a_no_op() {
        let parent = CancellationToken::new();
        let lifecycle = CauseToken::child_of(&parent);

        parent.cancel();
        lifecycle.done().await;
        lifecycle.fail(ListenerError::Other("late".into()));
        assert!(lifecycle.cause().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_failures_retain_exactly_one_cause() {
        let parent = CancellationToken::new();
        let lifecycle = CauseToken::child_of(&parent);

        let mut racers = Vec::new();
        for n in 0..8 {
            let lifecycle = lifecycle.clone();
            racers.push(tokio::spawn(async move {
                lifecycle.fail(ListenerError::Other(format!("racer {n}")));
            }));
        }
        for racer in racers {
            racer.await.unwrap();
        }

        tokio::time::timeout(Duration::from_secs(1), lifecycle.done())
            .await
            .unwrap();

        let first = lifecycle.cause().expect("one cause must be recorded");
        for _ in 0..4 {
            let again = lifecycle.cause().unwrap();
            assert_eq!(again.to_string(), first.to_string());
        }
    }
}
