//! Crypto price forecast service
//!
//! Core library for the prediction HTTP API.

pub mod core;
pub mod dispatcher;
pub mod infrastructure;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use infrastructure::config::{ApiConfig, Config, ModelsConfig};

use thiserror::Error;

/// Main error type for the forecast service
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ForecastError>;
