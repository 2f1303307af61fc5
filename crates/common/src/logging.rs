//! Logging utilities for monplug components.
//!
//! Plugins own stdout for their status line, so every subscriber installed
//! here writes to stderr.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when RUST_LOG is unset.
pub const DEFAULT_LEVEL: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize tracing with sensible defaults.
///
/// Uses the RUST_LOG environment variable to control log levels.
/// Default level is WARN.
pub fn init() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

/// Initialize tracing with JSON formatting (useful for structured logging).
pub fn init_json() {
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}
