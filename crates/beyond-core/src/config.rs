//! Configuration loading and typed config structures for The Beyond.
//!
//! The canonical configuration lives in `beyond-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads it. Every key is optional;
//! missing keys take the defaults documented on each field.

use std::path::{Path, PathBuf};

use beyond_explorers::ExplorerConfig;
use beyond_types::UserId;
use serde::Deserialize;

/// Environment variable that overrides `persistence.snapshot_path`.
pub const SNAPSHOT_PATH_ENV: &str = "BEYOND_SNAPSHOT_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `beyond-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, tick interval).
    #[serde(default)]
    pub world: WorldConfig,

    /// Resolver tunables.
    #[serde(default)]
    pub explorers: ExplorerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Snapshot persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Explorers enlisted at startup.
    #[serde(default)]
    pub seeding: SeedingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `BEYOND_SNAPSHOT_PATH` overrides `persistence.snapshot_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.persistence.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.persistence.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time seconds between ticks (default: 900).
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_secs: default_tick_interval_secs(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (default: pretty).
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Snapshot persistence configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Where the store is restored from and saved to. No persistence when
    /// unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl PersistenceConfig {
    /// Override fields from environment variables, if set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SNAPSHOT_PATH_ENV) {
            if !val.trim().is_empty() {
                self.snapshot_path = Some(PathBuf::from(val));
            }
        }
    }
}

/// Startup seeding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedingConfig {
    /// How many explorers to enlist when the world has none (default: 0).
    #[serde(default)]
    pub seed_explorers: u32,

    /// Player that owns seeded explorers. A fresh id when unset.
    #[serde(default)]
    pub seed_user: Option<UserId>,
}

fn default_world_name() -> String {
    "The Beyond".to_owned()
}

const fn default_tick_interval_secs() -> u64 {
    900
}

fn default_log_level() -> String {
    "info".to_owned()
}
