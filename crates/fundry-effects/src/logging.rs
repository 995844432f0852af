//! Subscriber bootstrap.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber: compact fmt output filtered
/// by `RUST_LOG` (default `info`). Safe to call more than once: later
/// calls are no-ops, which is what integration tests want.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
