//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize JSON tracing for the HTTP service
///
/// Uses `service.log_level` as the filter directive, falling back to `info`
/// when it does not parse. Calling this twice is harmless; the second
/// subscriber is simply not installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = env_filter(&config.service.log_level);

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();

    tracing::info!("Tracing initialized for service: {}", config.service.name);

    Ok(())
}

/// Initialize compact stderr tracing for command-line use
pub fn init_cli_tracing(level: &str) {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter(level))
        .try_init();
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Flush and shut down tracing
pub fn shutdown_tracing() {
    tracing::info!("Tracing shutdown complete");
}
