//! Logging setup
//!
//! Installs a `tracing` subscriber whose level comes from the resolved
//! configuration. `RUST_LOG`, when set, takes precedence.

use crate::config::LogLevel;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Timestamp pattern used for log lines
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the filter for the given level, preferring `RUST_LOG` when set
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.filter_directive()))
}

/// Sets up the tracing subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .try_init();
}
