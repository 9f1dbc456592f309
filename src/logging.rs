//! Logging setup for consumers of the engine.
//!
//! The library itself only emits `tracing` events; binaries and test
//! harnesses embedding the engine call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with a compact format and INFO default level.
///
/// The level can be overridden with the RUST_LOG environment variable.
pub fn init() {
    init_with_level("info")
}

/// Initialize tracing with a specific default level (debug, info, warn, error).
///
/// RUST_LOG still takes precedence when set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
