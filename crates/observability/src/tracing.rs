//! Tracing/logging initialization.
//!
//! Compact console output suited to an interactive CLI; level is
//! configurable via `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .without_time()
        .try_init();
}
