//! CLI error types

use numdiff_core::types::DifferentiationError;
use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Estimation error from the core
    #[error("Estimation error: {0}")]
    Estimation(#[from] DifferentiationError),

    /// Built-in function evaluated outside its domain
    #[error("Domain error: {function} is undefined at x = {x}")]
    Domain {
        /// Function name
        function: &'static str,
        /// Offending argument
        x: f64,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Thread pool construction error
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
