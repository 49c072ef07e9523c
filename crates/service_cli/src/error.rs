//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors surfaced by the `pricer` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    /// One or more configuration values are invalid.
    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),

    /// Pricing or sweep failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
