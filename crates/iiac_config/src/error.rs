//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Unsupported provider: {0} (only \"aws\" is supported)")]
    UnsupportedProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
