//! Tracing subscriber bootstrap.
//!
//! Logs go to stderr so they never interleave with the conversation on
//! stdout.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive that was rejected.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("tracing is already initialised: {0}")]
    AlreadyInitialised(#[from] tracing_subscriber::util::TryInitError),
}

/// Maps the `-v` count onto a filter, falling back to `default` when no
/// flag is given.
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8, default: &str) -> &str {
    match verbose {
        0 => default,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a global subscriber filtered by `filter` and writing to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for a bad directive and
/// [`TelemetryError::AlreadyInitialised`] when called twice.
pub fn init_tracing(filter: &str) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_new(filter).map_err(|err| TelemetryError::InvalidFilter {
            filter: filter.to_owned(),
            reason: err.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
