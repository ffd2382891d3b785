//! Mapping errors.
//!
//! Every failure is returned to the caller; the engine never logs and
//! swallows. Callers (repositories, handlers) are expected to wrap these
//! with operation-specific context and translate them into their own
//! error taxonomy.

use thiserror::Error;

/// Errors produced by registration and conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// A mapping for this type pair is already registered
    #[error("mapping {src} -> {dst} already exists")]
    MapAlreadyExists { src: String, dst: String },

    /// Registration attempted for a non-struct-shaped type pair
    #[error("unsupported mapping {src} -> {dst}: both sides must be struct-shaped")]
    UnsupportedMap { src: String, dst: String },

    /// Conversion attempted for a type pair that was never registered
    #[error("mapping {src} -> {dst} does not exist")]
    MapNotExist { src: String, dst: String },

    /// Strict mode: a source field has no destination correspondence
    #[error("source field {src}.{field} has no destination correspondence")]
    UnmatchedField { src: String, field: String },

    /// Strict mode: source and destination kinds cannot be converted
    #[error("cannot convert {src} into {dst}")]
    IncompatibleKinds { src: String, dst: String },
}

impl MapperError {
    /// Create a duplicate-registration error
    pub fn map_already_exists(src: impl Into<String>, dst: impl Into<String>) -> Self {
        MapperError::MapAlreadyExists {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Create an unsupported-pair error
    pub fn unsupported_map(src: impl Into<String>, dst: impl Into<String>) -> Self {
        MapperError::UnsupportedMap {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Create a missing-registration error
    pub fn map_not_exist(src: impl Into<String>, dst: impl Into<String>) -> Self {
        MapperError::MapNotExist {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Create a strict-mode unmatched-field error
    pub fn unmatched_field(src: impl Into<String>, field: impl Into<String>) -> Self {
        MapperError::UnmatchedField {
            src: src.into(),
            field: field.into(),
        }
    }

    /// Create a strict-mode kind-mismatch error
    pub fn incompatible_kinds(src: impl Into<String>, dst: impl Into<String>) -> Self {
        MapperError::IncompatibleKinds {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// Result type alias for mapping operations
pub type MapResult<T> = Result<T, MapperError>;
