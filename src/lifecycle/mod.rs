//! Lifecycle coordination subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Fold overrides → register signals → spawn runner → wait
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/... → cancel the outer lifecycle token
//!
//! Cause (cause.rs):
//!     Runner failure → cancel the inner token with a recorded cause
//!
//! Shutdown (shutdown.rs):
//!     Lifecycle done → drain under deadline → aggregate result
//! ```
//!
//! # Design Decisions
//! - One background task runs the listener; the calling task only waits
//! - First cancellation wins; the losing path is a harmless no-op
//! - Shutdown is attempted exactly once, even after a startup failure
//! - Signal registration is released on every exit path via a guard

pub mod cause;
pub mod shutdown;
pub mod signals;
pub mod startup;
