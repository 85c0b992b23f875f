//! Run settings and functional overrides.
//!
//! # Responsibilities
//! - Define the immutable settings record for a server run
//! - Provide ordered override functions folded over the defaults
//!
//! # Design Decisions
//! - Overrides apply in call order; later calls win for scalar fields
//! - Signal overrides accumulate instead of replacing the default set
//! - No validation: callers are responsible for sane values, and an
//!   empty signal set is legal (the process is then only stopped by
//!   force-kill or a listener failure)

use std::time::Duration;

/// OS signals that can trigger graceful shutdown.
///
/// Mapped to the platform's signal numbers by the lifecycle subsystem;
/// on non-Unix platforms a non-empty set degrades to Ctrl-C handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// SIGINT (Ctrl-C in a terminal).
    Interrupt,
    /// SIGTERM (default kill signal, used by systemd/Kubernetes).
    Terminate,
    /// SIGQUIT.
    Quit,
    /// SIGHUP.
    Hangup,
    /// SIGUSR1.
    User1,
    /// SIGUSR2.
    User2,
}

/// Settings for a single server run.
///
/// Built once from defaults plus overrides, then owned by the run for
/// its whole lifetime.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bound on the drain phase after shutdown begins.
    pub shutdown_timeout: Duration,

    /// Address the default HTTP listener binds to (e.g. "0.0.0.0:8080").
    pub bind_address: String,

    /// Signals that trigger graceful shutdown.
    pub signals: Vec<Signal>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(5),
            bind_address: "0.0.0.0:8080".to_string(),
            signals: vec![Signal::Interrupt, Signal::Terminate],
        }
    }
}

impl Settings {
    /// Fold the given overrides, in order, over the default settings.
    pub fn from_overrides(overrides: impl IntoIterator<Item = SettingsOverride>) -> Self {
        let mut settings = Self::default();
        for apply in overrides {
            apply(&mut settings);
        }
        settings
    }
}

/// A single settings override, applied in call order during [`Settings::from_overrides`].
pub type SettingsOverride = Box<dyn FnOnce(&mut Settings) + Send>;

/// Bound the drain phase by the given duration.
pub fn with_shutdown_timeout(timeout: Duration) -> SettingsOverride {
    Box::new(move |settings| settings.shutdown_timeout = timeout)
}

/// Address the default HTTP listener binds to.
pub fn with_bind_address(address: impl Into<String>) -> SettingsOverride {
    let address = address.into();
    Box::new(move |settings| settings.bind_address = address)
}

/// Add signals that trigger graceful shutdown.
///
/// Additive across multiple uses; the default set stays registered.
pub fn with_signals(signals: impl IntoIterator<Item = Signal> + Send + 'static) -> SettingsOverride {
    Box::new(move |settings| settings.signals.extend(signals))
}
