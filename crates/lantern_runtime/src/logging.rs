//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with game narration on stdout.
//! The filter comes from `LANTERN_LOG` (same syntax as `RUST_LOG`), falling
//! back to `warn`. `--trace` raises every Lantern crate to `debug`.

use tracing_subscriber::EnvFilter;

use lantern_foundation::{Error, ErrorKind, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LANTERN_LOG";

const DEFAULT_FILTER: &str = "warn";
const TRACE_FILTER: &str = "warn,lantern=debug";

/// Builds the log filter.
#[must_use]
pub fn filter(trace: bool) -> EnvFilter {
    if trace {
        return EnvFilter::new(TRACE_FILTER);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(trace: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(trace))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::new(ErrorKind::Internal(format!("logging: {e}"))))
}
