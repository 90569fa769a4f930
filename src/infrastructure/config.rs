//! Configuration management for the forecast service
//!
//! Loads configuration from config.toml at startup.
//! All values are configurable to avoid hardcoded constants.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Service configuration
///
/// Loaded from config.toml at startup. Contains all tunable parameters
/// to avoid hardcoded values throughout the codebase.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// API server settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Model artifact settings
    #[serde(default)]
    pub models: ModelsConfig,

    /// Metrics reporting settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Port for HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelsConfig {
    /// Path to the persisted model collection
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
}

/// Metrics reporting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable the push-based metrics reporter
    #[serde(default = "default_observability_enabled")]
    pub enabled: bool,

    /// Seconds between metrics snapshots
    #[serde(default = "default_observability_interval")]
    pub interval_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enabled: default_observability_enabled(),
            interval_seconds: default_observability_interval(),
        }
    }
}

fn default_api_port() -> u16 {
    5000
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("crypto_forecast_models.json")
}

fn default_observability_enabled() -> bool {
    true
}

fn default_observability_interval() -> u64 {
    60
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => {
                let config: Config = toml::from_str(&contents)
                    .map_err(|e| ConfigError::ParseError(e.to_string()))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File not found - use defaults
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading file
    IoError(std::io::Error),
    /// Parse error (invalid TOML)
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(_) => None,
        }
    }
}
