//! Domain layer - core business entities and their mapping configuration.
//!
//! This crate is the reference consumer of the `mapper` engine: it owns
//! the entity, persistence-model, and response-DTO shapes, and registers
//! every conversion pair in one place at startup.

pub mod constants;
pub mod error;
pub mod mappings;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use mappings::{mapper, register_mappings};
pub use user::{User, UserRecord, UserResponse, UserRole, UserSummary};
