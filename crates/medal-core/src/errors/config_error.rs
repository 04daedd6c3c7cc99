//! Configuration errors. Fatal at startup.

use super::error_code::{self, MedalErrorCode};

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Missing required parameter {field} for {context}")]
    MissingParameter { field: String, context: String },
}

impl MedalErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
