// src/logging.rs
//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV: &str = "PATHSIM_LOG";

/// Installs a stderr subscriber. `PATHSIM_LOG` wins over `verbose`; without
/// either, only warnings are shown. Safe to call more than once.
pub fn init(verbose: bool) {
    let fallback = if verbose { "pathsim_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
