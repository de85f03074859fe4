//! Tracing setup for the ideasjar CLI
//!
//! Usage:
//!   ideasjar --debug ...                   # Debug logging to stderr
//!   RUST_LOG=ideasjar_core=debug ideasjar  # Fine-grained log control
//!
//! Filter priority: RUST_LOG > --debug > `[log] level` in config > info

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug if RUST_LOG is not set)
    pub debug: bool,
    /// Filter from the config file
    pub level: Option<String>,
}

impl TracingConfig {
    fn fallback_filter(&self) -> String {
        if self.debug {
            "debug".to_string()
        } else {
            self.level.clone().unwrap_or_else(|| "info".to_string())
        }
    }
}

/// Initialize console tracing on stderr so stdout stays clean for piping
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
