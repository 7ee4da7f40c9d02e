//! Tracing subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

use crate::types::settings::LogLevel;

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `level`.
/// Subsequent calls are no-ops.
pub fn init_subscriber(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
