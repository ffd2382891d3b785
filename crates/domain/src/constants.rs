//! Domain-wide constants.

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";
