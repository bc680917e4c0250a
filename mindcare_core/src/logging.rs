//! Logging infrastructure for MindCare.
//!
//! Log output goes to stderr so rendered views on stdout stay clean.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging for the terminal front end.
///
/// Defaults to WARN so that corrupt-storage warnings surface while routine
/// load/save chatter stays quiet. Override with RUST_LOG.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
