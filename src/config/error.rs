//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI request timeout")]
    InvalidAiTimeout,

    #[error("AI max_retries exceeds maximum allowed (5)")]
    TooManyRetries,

    #[error("AI max_tokens must be between 1 and 8192")]
    InvalidMaxTokens,

    #[error("Invalid story analysis timeout")]
    InvalidAnalysisTimeout,

    #[error("{budget_secs}s of analysis does not fit in a {request_timeout_secs}s request")]
    AnalysisExceedsRequestTimeout {
        budget_secs: u64,
        request_timeout_secs: u64,
    },
}
