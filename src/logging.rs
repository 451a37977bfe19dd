//! Logging collaborator injected into the decoders.
//!
//! Decoders never touch the process-wide subscriber. Each one holds a
//! [`Logger`] and runs its work inside [`Logger::in_scope`], so the
//! `tracing` events it emits go to whatever dispatcher the caller
//! supplied (or nowhere, for [`Logger::noop`]).

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Directive used when the caller's filter string cannot be parsed.
const FALLBACK_DIRECTIVE: &str = "warn";

/// A cloneable handle to a `tracing` dispatcher.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// A logger that discards every event.
    pub fn noop() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Wrap an existing dispatcher.
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Human-readable logs on stderr, filtered by an `EnvFilter` directive
    /// string such as `"debug"` or `"txlens=trace"`.
    pub fn stderr(directives: &str) -> Self {
        let filter =
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();

        Self::from_dispatch(Dispatch::new(subscriber))
    }

    /// Run `f` with this logger as the thread's default dispatcher.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}
