//! Errors raised by pantry rules before anything touches the backend.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejected input or a broken rule.
///
/// Backend and transport failures are reported by the infrastructure layer,
/// never through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input that cannot become a request (empty name, quantity < 1).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stored record that breaks a rule, e.g. a zero quantity.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A name the document store cannot use as a document id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
