//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (database, transport).

use thiserror::Error;
use validator::ValidationErrors;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(first_message(&errors))
    }
}

/// Get the first validation error message
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .next()
        .and_then(|(field, errors)| errors.first().map(|error| (field, error)))
        .map(|(field, error)| match &error.message {
            Some(msg) => msg.to_string(),
            None => format!("{} failed {} validation", field, error.code),
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
