//! Structured logging infrastructure for FleetWatch.
//!
//! This module provides centralized logging initialization with support
//! for structured JSON output and environment-based configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the logging system with structured output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level.
///
/// # Example
/// ```no_run
/// use fleetwatch_core::logging;
///
/// logging::init();
/// tracing::info!("Fleet loaded");
/// ```
pub fn init() {
    init_with_level("info", false);
}

/// Initialize the logging system with JSON output for production environments.
pub fn init_json() {
    init_with_level("info", true);
}

/// Initialize logging from the `[logging]` config section.
pub fn init_from_config(config: &LoggingConfig) {
    init_with_level(&config.level, config.json);
}

/// Initialize logging with `default_level` used when `RUST_LOG` is unset.
///
/// Later calls are ignored, so tests and binaries can both call this.
pub fn init_with_level(default_level: &str, json: bool) {
    let filter = env_filter(default_level);

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_doesnt_panic() {
        init_with_level("debug", false);
        init_with_level("info", true);
    }

    #[test]
    fn test_bad_directive_falls_back() {
        let _ = env_filter("not a [valid directive");
    }
}
