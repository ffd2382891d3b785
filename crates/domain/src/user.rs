//! User domain entity and the shapes it converts to and from.

use chrono::{DateTime, Utc};
use mapper::{reflect_struct, Mapper, Reflect, ScalarKind, Shape, Value};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_USER};
use crate::error::{DomainError, DomainResult};

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Roles reflect as their string form, so an entity-side enum converts
/// against a stringly-typed record or DTO field without a custom map.
impl Reflect for UserRole {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Str)
    }

    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Str(role) => UserRole::from(role.as_str()),
            _ => UserRole::default(),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with default role
    pub fn new(id: Uuid, email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            name,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Soft delete the user
    pub fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Produce the client-facing response through the mapping engine.
    pub fn to_response(&self, mapper: &Mapper) -> DomainResult<UserResponse> {
        mapper
            .map(self)
            .map_err(|source| DomainError::mapping("UserResponse", source))
    }
}

/// User persistence record, as the storage layer sees it.
///
/// Stringly-typed on purpose: the row format does not know about domain
/// enums. Hydration and persistence both go through the mapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address
    pub email: String,
    /// User display name
    pub name: String,
    /// User role
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Soft delete timestamp (if deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Compact listing line; built by a custom map, not field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub display: String,
    pub admin: bool,
}

reflect_struct!(User {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    role: UserRole,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
});

reflect_struct!(UserRecord {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
});

reflect_struct!(UserResponse {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
});

reflect_struct!(UserSummary {
    id: Uuid,
    display: String,
    admin: bool,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_reflects_as_string() {
        assert_eq!(UserRole::Admin.to_value(), Value::Str("admin".into()));
        assert_eq!(
            UserRole::from_value(&Value::Str("admin".into())),
            UserRole::Admin
        );
        assert_eq!(
            UserRole::from_value(&Value::Str("unknown".into())),
            UserRole::User
        );
    }

    #[test]
    fn test_soft_delete() {
        let mut user = User::new(
            Uuid::new_v4(),
            "a@b.c".into(),
            "hash".into(),
            "Alice".into(),
        );
        assert!(user.is_active());
        user.soft_delete();
        assert!(!user.is_active());
    }
}
