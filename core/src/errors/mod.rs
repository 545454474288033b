//! Domain-specific error types and error handling.

mod types;


pub use types::{ContactChangeError, DeliveryError, DenialReason, ProviderError, ProviderFailure};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to workflow outcomes surfaced to the caller
    #[error(transparent)]
    ContactChange(#[from] ContactChangeError),
}

impl DomainError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an internal fault
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// The contact change outcome carried by this error, if any
    pub fn as_contact_change(&self) -> Option<&ContactChangeError> {
        match self {
            DomainError::ContactChange(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
