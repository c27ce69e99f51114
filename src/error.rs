//! Error types for Redline
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Redline
#[derive(Debug, Error)]
pub enum RedlineError {
    /// Missing or invalid configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input document missing, unreadable, or empty
    #[error("Input error: {0}")]
    Input(String),

    /// Any failure from a remote completion call (auth, network, quota,
    /// malformed response body)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Prompt template rendering failure
    #[error("Template error: {0}")]
    Template(String),

    /// Failure writing the revised document
    #[error("Output error: {0}")]
    Output(String),
}

/// Result type alias for Redline operations
pub type Result<T> = std::result::Result<T, RedlineError>;
