//! Default HTTP listener built on axum.
//!
//! # Responsibilities
//! - Bind a TCP listener on the configured address
//! - Serve the caller's router until a cooperative stop
//! - Drain in-flight requests when stopped, honoring the deadline
//!
//! # Design Decisions
//! - `start` surfaces a cooperative stop as the `Closed` sentinel, the
//!   same way it would be reported by any other transport
//! - `stop` returns as soon as serving finished or the deadline token
//!   was cancelled, whichever first

use std::net::SocketAddr;
use std::sync::OnceLock;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{Settings, SettingsOverride};
use crate::error::{ListenerError, RunError};
use crate::lifecycle::startup::supervise;
use crate::listener::Listener;

/// Run an HTTP server for the given router until a termination signal
/// or failure, then drain it under the configured deadline.
///
/// Blocks for the lifetime of the server; binds to the configured
/// `bind_address`. Returns `Ok(())` on a clean graceful exit, or the
/// composite [`RunError`].
pub async fn run(
    router: Router,
    overrides: impl IntoIterator<Item = SettingsOverride>,
) -> Result<(), RunError> {
    let settings = Settings::from_overrides(overrides);
    let listener = HttpListener::new(settings.bind_address.clone(), router);
    supervise(std::sync::Arc::new(listener), &settings).await
}

/// HTTP transport listener serving an axum router.
pub struct HttpListener {
    address: String,
    router: Router,
    /// Cancelled by `stop` to end accepting and begin the drain.
    stop: CancellationToken,
    /// Cancelled by `start` once serving has fully finished.
    done: CancellationToken,
    local_addr: OnceLock<SocketAddr>,
}

impl HttpListener {
    /// Create a listener for the given bind address and router.
    pub fn new(address: impl Into<String>, router: Router) -> Self {
        Self {
            address: address.into(),
            router,
            stop: CancellationToken::new(),
            done: CancellationToken::new(),
            local_addr: OnceLock::new(),
        }
    }

    /// The bound address, once `start` has bound successfully.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    async fn serve(&self) -> Result<(), ListenerError> {
        let tcp = TcpListener::bind(&self.address).await?;
        let addr = tcp.local_addr()?;
        let _ = self.local_addr.set(addr);
        tracing::info!(address = %addr, "listening for connections");

        let stop = self.stop.clone();
        axum::serve(tcp, self.router.clone())
            .with_graceful_shutdown(async move { stop.cancelled().await })
            .await?;

        // With a graceful-shutdown future attached, serving only ends
        // once a stop was requested and the drain finished.
        Err(ListenerError::Closed)
    }
}

impl Listener for HttpListener {
    async fn start(&self) -> Result<(), ListenerError> {
        let result = self.serve().await;
        self.done.cancel();
        result
    }

    async fn stop(&self, deadline: CancellationToken) -> Result<(), ListenerError> {
        self.stop.cancel();
        tokio::select! {
            biased;
            () = self.done.cancelled() => Ok(()),
            () = deadline.cancelled() => Err(ListenerError::DrainTimedOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_conflict_is_a_startup_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let listener = HttpListener::new(addr.to_string(), Router::new());
        let result = listener.start().await;
        assert!(matches!(result, Err(ListenerError::Io(_))));

        // A failed start must not leave stop hanging.
        let deadline = CancellationToken::new();
        assert!(listener.stop(deadline).await.is_ok());
    }

    #[tokio::test]
    async fn stop_ends_serving_cooperatively() {
        let listener = std::sync::Arc::new(HttpListener::new("127.0.0.1:0", Router::new()));

        let server = tokio::spawn({
            let listener = listener.clone();
            async move { listener.start().await }
        });

        // Wait for the bind before stopping.
        while listener.local_addr().is_none() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let deadline = CancellationToken::new();
        assert!(listener.stop(deadline).await.is_ok());
        assert!(matches!(server.await.unwrap(), Err(ListenerError::Closed)));
    }
}
