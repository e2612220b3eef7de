//! Demo configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Demo configuration.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Simulated network latency per operation.
    pub delay: Duration,
    /// Data directory for the file-backed store; in-memory when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory holding the bundled fixture assets.
    pub assets_dir: PathBuf,
}

impl DemoConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let delay_ms = env::var("ELLAIA_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(500u64);

        Self {
            delay: Duration::from_millis(delay_ms),
            data_dir: env::var("ELLAIA_DATA_DIR").ok().map(PathBuf::from),
            assets_dir: env::var("ELLAIA_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/mock-data")),
        }
    }
}
