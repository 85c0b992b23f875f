//! Startup orchestration.
//!
//! # Responsibilities
//! - Fold overrides into the run settings
//! - Register signal handling for the run's lifetime
//! - Spawn the runner task that drives the listener
//! - Hand off to the shutdown sequencer and return its verdict
//!
//! # Design Decisions
//! - The calling task never serves; it waits on the lifecycle context
//! - Runner failures cancel the lifecycle with a recorded cause; the
//!   cooperative-close sentinel is success and records nothing
//! - Signal registration failure is reported as a startup failure

use std::sync::Arc;

use crate::config::{Settings, SettingsOverride};
use crate::error::RunError;
use crate::lifecycle::cause::CauseToken;
use crate::lifecycle::{shutdown, signals};
use crate::listener::Listener;

/// Run the given listener until a termination signal or failure, then
/// drain it under the configured deadline.
///
/// Blocks for the lifetime of the server. Returns `Ok(())` on a clean
/// graceful exit, or the composite [`RunError`] describing startup
/// and/or shutdown failure. The `bind_address` setting is unused here —
/// the caller owns the transport.
pub async fn run_listener<L: Listener>(
    listener: L,
    overrides: impl IntoIterator<Item = SettingsOverride>,
) -> Result<(), RunError> {
    let settings = Settings::from_overrides(overrides);
    supervise(Arc::new(listener), &settings).await
}

/// The coordination body shared by every entry point.
pub(crate) async fn supervise<L: Listener>(
    listener: Arc<L>,
    settings: &Settings,
) -> Result<(), RunError> {
    // The guard lives across the whole body: registration is released
    // on every exit path.
    let (signal_token, _signal_guard) = match signals::listen(&settings.signals) {
        Ok(registered) => registered,
        Err(err) => return Err(RunError::from_startup(err.into())),
    };

    let lifecycle = CauseToken::child_of(&signal_token);

    // The runner: the only background task. A non-sentinel failure from
    // start unblocks the sequencer with that failure as the cause.
    let _runner = tokio::spawn({
        let listener = Arc::clone(&listener);
        let lifecycle = lifecycle.clone();
        async move {
            if let Err(err) = listener.start().await {
                if !err.is_closed() {
                    lifecycle.fail(err);
                }
            }
        }
    });

    shutdown::sequence(&lifecycle, listener.as_ref(), settings).await
}
