//! Error types for the chbridge CLI
//!
//! This module provides user-friendly error types with clear, actionable
//! messages that help users understand what went wrong and how to fix it.
//!
//! Job-level failures (service rejections, lost connections, jobs that end
//! in an error state) are deliberately NOT represented here: the transfer
//! engine reconciles those into a single [`FinalOutcome`] with
//! `success: false` so that exactly one result is ever reported per
//! operation. `CliError` covers everything that prevents an operation from
//! producing an outcome at all.
//!
//! [`FinalOutcome`]: crate::transfer::FinalOutcome

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// A required field is missing or empty before submission.
    /// Fails fast: no request is sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// API server communication failed
    #[error("Server error: {0}. Ensure the ingestion service is running and accessible.")]
    Api(String),

    /// The operation was stopped before a terminal outcome arrived
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or flags.")]
    Config(String),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your connection and server URL.")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a cancellation error
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = CliError::validation("at least one column must be selected");
        assert_eq!(
            err.to_string(),
            "Validation error: at least one column must be selected"
        );
    }

    #[test]
    fn test_cancelled_error_message() {
        let err = CliError::cancelled("view torn down");
        assert!(err.to_string().contains("cancelled"));
    }
}
