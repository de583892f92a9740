//! Error types for d2d-controller

use thiserror::Error;

/// Errors that can occur while obtaining a controller token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Controller settings are missing from the environment
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingSettings(Vec<String>),

    /// A single endpoint could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// Every endpoint was tried and none produced a token
    #[error("Authentication failed on all endpoints: {}", .attempts.join("; "))]
    AllEndpointsFailed {
        /// One entry per endpoint, in the order they were tried
        attempts: Vec<String>,
    },
}

impl AuthError {
    /// Check if retrying later might succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Transport(_))
    }
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, AuthError>;
