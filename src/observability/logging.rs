//! # Logging
//!
//! Installs the global `tracing` subscriber. Logs go to stderr so stdout only
//! ever carries the generation response.
//!
//! `RUST_LOG` wins when set; otherwise the crate logs at `LOG_LEVEL`.

use crate::config::GeneratorConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(log_level: &str) -> String {
    let level = match log_level.trim().to_ascii_lowercase().as_str() {
        level @ ("error" | "warn" | "info" | "debug" | "trace") => level.to_string(),
        _ => "info".to_string(),
    };
    format!("resource_synth={level}")
}

/// Initialize the global subscriber from the host configuration
pub fn init_logging(config: &GeneratorConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json_logs() {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize JSON logging: {e}"))
    } else {
        builder
            .with_ansi(config.log_enable_color)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("INFO"), "resource_synth=info");
        assert_eq!(default_directive(" Debug "), "resource_synth=debug");
        assert_eq!(default_directive("verbose"), "resource_synth=info");
    }
}
