//! Transport listener capability.
//!
//! The run coordinates any transport through this trait; it never looks
//! inside. The crate ships an HTTP implementation in [`crate::http`],
//! and tests drive the lifecycle with mock listeners.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ListenerError;

/// A transport listener the run starts and, later, drains.
///
/// The listener is shared between the runner task (which calls `start`)
/// and the shutdown sequencer (which calls `stop`); implementations
/// must tolerate `stop` arriving before, during, or after `start`
/// returning.
pub trait Listener: Send + Sync + 'static {
    /// Serve until stopped.
    ///
    /// Blocks for the serving lifetime. Returns
    /// [`ListenerError::Closed`] after a cooperative stop (treated as
    /// success), or any other error on a startup or runtime failure.
    fn start(&self) -> impl Future<Output = Result<(), ListenerError>> + Send;

    /// Stop accepting and drain in-flight work.
    ///
    /// `deadline` is cancelled when the configured shutdown timeout
    /// elapses; implementations must then give up draining and return
    /// promptly, reporting an error if they could not stop cleanly.
    fn stop(
        &self,
        deadline: CancellationToken,
    ) -> impl Future<Output = Result<(), ListenerError>> + Send;
}
