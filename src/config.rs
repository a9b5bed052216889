use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Runtime configuration, read from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where persisted view state lives
    #[serde(default)]
    pub storage: StorageConfig,
    /// Simulated auth backend
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite file holding the key-value records
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "dentalflow.db".to_string(),
        }
    }
}

/// Latency range of the simulated auth backend. `max_delay_ms = 0` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 300,
            max_delay_ms: 800,
        }
    }
}

impl AuthConfig {
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter, overridden by `DENTALFLOW_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dentalflow=info".to_string(),
        }
    }
}

impl Config {
    /// Loads `path` if given and present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.auth.min_delay_ms > config.auth.max_delay_ms {
            anyhow::bail!(
                "auth.min_delay_ms ({}) is greater than auth.max_delay_ms ({})",
                config.auth.min_delay_ms,
                config.auth.max_delay_ms
            );
        }
        Ok(config)
    }
}
