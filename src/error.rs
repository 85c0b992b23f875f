//! Error types for the run lifecycle.
//!
//! Two layers: [`ListenerError`] is what the transport listener reports
//! from its start/stop operations, [`RunError`] is the composite the
//! whole run returns, preserving each failure component individually.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Error reported by a transport listener's start or stop operation.
///
/// `Closed` is the cooperative-close sentinel: `start` returns it when
/// the listener was stopped on purpose, and the run treats it as
/// success, never as a startup failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ListenerError {
    /// The listener was stopped cooperatively. Not a failure.
    #[error("listener closed")]
    Closed,

    /// An I/O failure, typically binding or accepting.
    #[error("{0}")]
    Io(Arc<std::io::Error>),

    /// The drain deadline elapsed while connections were still open.
    #[error("connections still draining when the shutdown deadline elapsed")]
    DrainTimedOut,

    /// Any other listener-specific failure.
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for ListenerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl ListenerError {
    /// Whether this is the cooperative-close sentinel.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Composite failure returned by a server run.
///
/// Combines up to three distinguishable components: the startup cause
/// recorded by the runner, the error returned by the listener's stop
/// call, and a marker that the shutdown deadline elapsed. A run with no
/// components returns `Ok(())` instead of an empty composite.
#[derive(Debug, Clone)]
pub struct RunError {
    startup: Option<ListenerError>,
    shutdown: Option<ListenerError>,
    deadline: Option<Duration>,
}

impl RunError {
    /// Build the composite, or `None` when every component is absent.
    pub(crate) fn aggregate(
        startup: Option<ListenerError>,
        shutdown: Option<ListenerError>,
        deadline: Option<Duration>,
    ) -> Option<Self> {
        if startup.is_none() && shutdown.is_none() && deadline.is_none() {
            return None;
        }
        Some(Self {
            startup,
            shutdown,
            deadline,
        })
    }

    /// A composite holding only a startup cause.
    pub(crate) fn from_startup(err: ListenerError) -> Self {
        Self {
            startup: Some(err),
            shutdown: None,
            deadline: None,
        }
    }

    /// The listener failure that ended the run, if startup failed.
    pub fn startup(&self) -> Option<&ListenerError> {
        self.startup.as_ref()
    }

    /// The error the listener's stop call returned, if any.
    pub fn shutdown(&self) -> Option<&ListenerError> {
        self.shutdown.as_ref()
    }

    /// The configured drain bound, if the shutdown deadline elapsed.
    pub fn deadline_elapsed(&self) -> Option<Duration> {
        self.deadline
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(err) = &self.startup {
            write!(f, "failed to start server: {err}")?;
            sep = "; ";
        }
        if let Some(err) = &self.shutdown {
            write!(f, "{sep}failed to shut down gracefully: {err}")?;
            sep = "; ";
        }
        if let Some(timeout) = self.deadline {
            write!(f, "{sep}shutdown deadline of {timeout:?} elapsed")?;
        }
        Ok(())
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.startup
            .as_ref()
            .or(self.shutdown.as_ref())
            .map(|err| err as &(dyn Error + 'static))
    }
}
