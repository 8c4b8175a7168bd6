//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        /// Rejected directive.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Installs a formatted subscriber filtered by `filter`, for example
/// `info` or `taskboard=debug`.
///
/// # Errors
///
/// Returns [`TelemetryError`] for a malformed directive or when a global
/// subscriber already exists.
pub fn init_tracing(filter: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| TelemetryError::Filter {
        filter: filter.to_owned(),
        source,
    })?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
