//! Logging initialization built on tracing/tracing-subscriber.
//!
//! The library itself only emits `tracing` events; these helpers are for
//! hosting applications and tests that want a ready-made subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber for an embedding application.
///
/// Honors `RUST_LOG` (e.g. `RUST_LOG=fuelbook_importer=debug`), defaulting
/// to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Initialize a test subscriber at debug level.
///
/// Safe to call from multiple tests; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
