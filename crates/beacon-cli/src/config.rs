//! Configuration loading for the beacon CLI.
//! Reads beacon.toml from the current directory or the path in BEACON_CONFIG.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use beacon_common::ScoringConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String { "beacon=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

pub const CONFIG_ENV: &str = "BEACON_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "beacon.toml";

impl Config {
    /// Resolve the config path: explicit flag, then BEACON_CONFIG, then ./beacon.toml.
    pub fn resolve_path(explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            warn!("Config file not found: {path}; using built-in defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Could not parse {path}: {e}"))?;
        config.scoring.validate()?;
        Ok(config)
    }

    pub fn load(explicit: Option<&str>) -> anyhow::Result<Self> {
        Self::load_from(&Self::resolve_path(explicit))
    }
}
