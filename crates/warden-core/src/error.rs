//! Unified error type for Warden operations
//!
//! Every failure in the moderation core degrades to a no-op or a default
//! value; errors exist so the boundary that swallows them can log what
//! happened, not to abort processing.

use serde::{Deserialize, Serialize};

/// Unified error type for all Warden operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WardenError {
    /// The assistant lacks authority for a privileged action
    #[error("capability denied: {message}")]
    CapabilityDenied {
        /// What authority was missing and where
        message: String,
    },

    /// A profile, alias, or room-state fetch failed
    #[error("lookup failed: {message}")]
    LookupFailure {
        /// What lookup failed
        message: String,
    },

    /// The transport rejected a moderation action
    #[error("action failed: {message}")]
    ActionFailure {
        /// What action was rejected
        message: String,
    },

    /// A configuration key was absent
    #[error("missing config: {key}")]
    ConfigMissing {
        /// The absent configuration key
        key: String,
    },

    /// A federation identifier failed validation
    #[error("invalid identifier: {message}")]
    InvalidIdentifier {
        /// What was wrong with the identifier
        message: String,
    },
}

impl WardenError {
    /// Create a capability denied error
    pub fn capability_denied(message: impl Into<String>) -> Self {
        Self::CapabilityDenied {
            message: message.into(),
        }
    }

    /// Create a lookup failure error
    pub fn lookup_failure(message: impl Into<String>) -> Self {
        Self::LookupFailure {
            message: message.into(),
        }
    }

    /// Create an action failure error
    pub fn action_failure(message: impl Into<String>) -> Self {
        Self::ActionFailure {
            message: message.into(),
        }
    }

    /// Create a missing config error
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::ConfigMissing { key: key.into() }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
        }
    }
}

/// Result alias used across the Warden crates
pub type Result<T> = std::result::Result<T, WardenError>;
