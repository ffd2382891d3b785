//! Domain-level errors.
//!
//! Independent of infrastructure concerns; mapping failures are wrapped
//! with the entity being produced so an unexpected missing registration
//! surfaces with usable context.

use mapper::MapperError;
use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A model conversion failed
    #[error("error in the mapping {entity}")]
    Mapping {
        entity: String,
        #[source]
        source: MapperError,
    },

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Wrap a mapper failure with the entity being produced
    pub fn mapping(entity: impl Into<String>, source: MapperError) -> Self {
        DomainError::Mapping {
            entity: entity.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
