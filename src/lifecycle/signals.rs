//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for the configured signal set
//! - Cancel the outer lifecycle token on first arrival
//! - Release the registration when the run exits
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Registration is process-wide; the returned guard scopes it to the
//!   run by aborting the watcher task on drop
//! - An empty signal set spawns no watcher: the token is then only
//!   cancellable through the run's failure path

use std::io;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Signal;

/// Releases the signal registration when dropped.
///
/// Held across the whole run body so every exit path, including the
/// failure ones, stops intercepting signals.
#[derive(Debug)]
pub struct SignalGuard {
    watcher: Option<JoinHandle<()>>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

#[cfg(unix)]
fn kind(signal: Signal) -> tokio::signal::unix::SignalKind {
    use tokio::signal::unix::SignalKind;
    match signal {
        Signal::Interrupt => SignalKind::interrupt(),
        Signal::Terminate => SignalKind::terminate(),
        Signal::Quit => SignalKind::quit(),
        Signal::Hangup => SignalKind::hangup(),
        Signal::User1 => SignalKind::user_defined1(),
        Signal::User2 => SignalKind::user_defined2(),
    }
}

/// Register the given signal set and return a token cancelled on first
/// arrival, plus the guard releasing the registration.
#[cfg(unix)]
pub fn listen(signals: &[Signal]) -> io::Result<(CancellationToken, SignalGuard)> {
    use tokio::signal::unix::signal as unix_signal;

    let token = CancellationToken::new();

    let mut registered: Vec<Signal> = Vec::new();
    let mut streams = Vec::new();
    for &sig in signals {
        if registered.contains(&sig) {
            continue;
        }
        streams.push(unix_signal(kind(sig))?);
        registered.push(sig);
    }

    if streams.is_empty() {
        return Ok((token, SignalGuard { watcher: None }));
    }

    let watcher = tokio::spawn({
        let token = token.clone();
        async move {
            let mut streams = streams;
            let waits = streams
                .iter_mut()
                .map(|stream| Box::pin(stream.recv()))
                .collect::<Vec<_>>();
            let (_, index, _) = futures_util::future::select_all(waits).await;
            tracing::info!(signal = ?registered[index], "termination signal received");
            token.cancel();
        }
    });

    Ok((token, SignalGuard { watcher: Some(watcher) }))
}

/// Non-Unix fallback: a non-empty set degrades to Ctrl-C handling.
#[cfg(not(unix))]
pub fn listen(signals: &[Signal]) -> io::Result<(CancellationToken, SignalGuard)> {
    let token = CancellationToken::new();

    if signals.is_empty() {
        return Ok((token, SignalGuard { watcher: None }));
    }

    let watcher = tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("termination signal received");
                token.cancel();
            }
        }
    });

    Ok((token, SignalGuard { watcher: Some(watcher) }))
}
