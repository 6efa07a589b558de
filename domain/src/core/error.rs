//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Both variants carry a caller-facing message; the presentation layer maps
/// them onto HTTP statuses without rewording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        DomainError::InvalidParameter(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }

    /// Check if this error was caused by malformed user input
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, DomainError::InvalidParameter(_))
    }

    /// Check if this error means no quote satisfied the request
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    /// The message shown to callers
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidParameter(m) | DomainError::NotFound(m) => m,
        }
    }
}
