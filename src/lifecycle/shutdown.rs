//! Shutdown sequencing.
//!
//! # Responsibilities
//! - Wait for the lifecycle context to complete
//! - Drain the listener under the configured deadline
//! - Aggregate every failure component into one result
//!
//! # Design Decisions
//! - Drain is attempted even after a startup failure (the listener may
//!   have partially started)
//! - When the deadline elapses, the deadline token is cancelled and the
//!   stop call is expected to return promptly; both the stop call's own
//!   error and the deadline marker are reported when both occur
//! - No retries: one drain attempt per run

use std::pin::pin;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::error::{ListenerError, RunError};
use crate::lifecycle::cause::CauseToken;
use crate::listener::Listener;

/// Block until the lifecycle completes, then drain and aggregate.
pub async fn sequence<L: Listener>(
    lifecycle: &CauseToken,
    listener: &L,
    settings: &Settings,
) -> Result<(), RunError> {
    // WAITING: signal arrival and runner failure race to complete this.
    lifecycle.done().await;

    let startup = lifecycle.cause();
    if let Some(err) = &startup {
        tracing::error!(error = %err, "server failed to start");
    }

    tracing::info!("shutting down server");
    let (shutdown, deadline_elapsed) = drain(listener, settings.shutdown_timeout).await;

    match RunError::aggregate(
        startup,
        shutdown.err(),
        deadline_elapsed.then_some(settings.shutdown_timeout),
    ) {
        Some(err) => Err(err),
        None => {
            tracing::info!("server exited");
            Ok(())
        }
    }
}

/// DRAINING: stop the listener under a fresh deadline-bound token.
///
/// Returns the stop call's result and whether the deadline elapsed.
async fn drain<L: Listener>(
    listener: &L,
    timeout: Duration,
) -> (Result<(), ListenerError>, bool) {
    let deadline = CancellationToken::new();
    let mut stop = pin!(listener.stop(deadline.clone()));

    let result = tokio::select! {
        result = &mut stop => result,
        () = tokio::time::sleep(timeout) => {
            deadline.cancel();
            stop.await
        }
    };

    let deadline_elapsed = deadline.is_cancelled();
    (result, deadline_elapsed)
}
