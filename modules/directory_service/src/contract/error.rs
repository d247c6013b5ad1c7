//! Contract error types for directory service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Directory service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Building, organization or activity does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (building, organization, activity)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Payload rejected (duplicate name, nesting too deep, malformed input)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Caller presented a missing or wrong API key
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// Store failure; details are logged, not surfaced
    #[error("Internal error")]
    Internal,
}

impl DirectoryError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}
