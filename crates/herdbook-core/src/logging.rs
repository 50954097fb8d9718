//! Tracing subscriber bootstrap for embedding applications.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! embedder's decision. `init` is a convenience for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset or invalid.
///
/// Idempotent: repeated calls after the first are no-ops.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
