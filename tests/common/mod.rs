//! Shared mock listeners for lifecycle integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use grace::{Listener, ListenerError};
use tokio_util::sync::CancellationToken;

/// What the mock's stop operation does once invoked.
#[derive(Clone)]
pub enum StopBehavior {
    /// Return the given result right away.
    Ready(Result<(), ListenerError>),
    /// Wait for the deadline token, then return the given result.
    AfterDeadline(Result<(), ListenerError>),
}

struct Inner {
    /// Returned immediately by start when set; otherwise start blocks
    /// until stop is invoked and then returns the `Closed` sentinel.
    start_error: Option<ListenerError>,
    stop_behavior: StopBehavior,
    stop_requested: CancellationToken,
    stop_calls: AtomicUsize,
}

/// A scriptable transport listener. Clones share state, so tests can
/// hand one clone to the run and inspect the other afterwards.
#[derive(Clone)]
pub struct MockListener {
    inner: Arc<Inner>,
}

impl MockListener {
    pub fn new(start_error: Option<ListenerError>, stop_behavior: StopBehavior) -> Self {
        Self {
            inner: Arc::new(Inner {
                start_error,
                stop_behavior,
                stop_requested: CancellationToken::new(),
                stop_calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Starts fine, drains cleanly on stop.
    pub fn cooperative() -> Self {
        Self::new(None, StopBehavior::Ready(Ok(())))
    }

    /// Start fails immediately with the given error.
    pub fn failing(err: ListenerError) -> Self {
        Self::new(Some(err), StopBehavior::Ready(Ok(())))
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.stop_calls.load(Ordering::SeqCst)
    }
}

impl Listener for MockListener {
    async fn start(&self) -> Result<(), ListenerError> {
        if let Some(err) = self.inner.start_error.clone() {
            return Err(err);
        }
        self.inner.stop_requested.cancelled().await;
        Err(ListenerError::Closed)
    }

    async fn stop(&self, deadline: CancellationToken) -> Result<(), ListenerError> {
        self.inner.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.stop_requested.cancel();
        match self.inner.stop_behavior.clone() {
            StopBehavior::Ready(result) => result,
            StopBehavior::AfterDeadline(result) => {
                deadline.cancelled().await;
                result
            }
        }
    }
}

/// Raise a signal at the test process itself.
#[cfg(unix)]
pub fn raise(signal: libc::c_int) {
    unsafe {
        libc::kill(libc::getpid(), signal);
    }
}
