//! Configuration management for the chbridge CLI
//!
//! Handles CLI settings like the ingestion service URL and poll cadence.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default ingestion service URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default status-poll cadence in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ingestion service URL
    pub server_url: String,

    /// Status-poll cadence in milliseconds
    pub poll_interval_ms: u64,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            verbose: false,
        }
    }

    /// Load config from environment variables
    ///
    /// - `CHBRIDGE_SERVER_URL`: ingestion service base URL
    /// - `CHBRIDGE_POLL_INTERVAL_MS`: status-poll cadence
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("CHBRIDGE_SERVER_URL") {
            config.server_url = url;
        }

        if let Ok(ms) = std::env::var("CHBRIDGE_POLL_INTERVAL_MS") {
            config.poll_interval_ms = ms.parse().map_err(|_| {
                crate::error::CliError::config(format!(
                    "CHBRIDGE_POLL_INTERVAL_MS must be an integer, got '{}'",
                    ms
                ))
            })?;
        }

        Ok(config)
    }

    /// Get the server URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Poll cadence as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
