//! Policy error types

use thiserror::Error;

/// Errors from policy-rule handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// An entity pattern could not be compiled.
    #[error("invalid entity pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// Why compilation failed
        message: String,
    },
}

impl PolicyError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
