//! Graceful startup and shutdown coordination for long-running servers.
//!
//! # Architecture Overview
//!
//! ```text
//!   run(router, overrides)
//!        │
//!        ▼
//!   ┌──────────┐     ┌───────────────────┐     ┌─────────────────┐
//!   │  config  │────▶│     lifecycle     │────▶│    shutdown     │
//!   │ settings │     │ signals + runner  │     │ drain + result  │
//!   └──────────┘     └─────────┬─────────┘     └─────────────────┘
//!                              │
//!                              ▼
//!                    ┌───────────────────┐
//!                    │     listener      │  (http, or caller-owned)
//!                    └───────────────────┘
//! ```
//!
//! The calling task blocks on the lifecycle context — completed by the
//! first termination signal or by a listener failure — then drains the
//! listener under a bounded deadline and returns one composite result.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use grace::{run, with_shutdown_timeout};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), grace::RunError> {
//! let app = Router::new().route("/", get(|| async { "ok" }));
//! run(app, [with_shutdown_timeout(Duration::from_secs(10))]).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod listener;

pub use config::{
    with_bind_address, with_shutdown_timeout, with_signals, Settings, SettingsOverride, Signal,
};
pub use error::{ListenerError, RunError};
pub use http::{run, HttpListener};
pub use lifecycle::startup::run_listener;
pub use listener::Listener;
