//! Mapping configuration.
//!
//! Every conversion pair the domain relies on is registered here, in one
//! place, before request traffic starts. Services receive the configured
//! [`Mapper`] by reference; [`mapper()`] provides the shared
//! process-wide instance for binaries that do not inject their own.

use mapper::{MapResult, Mapper};
use once_cell::sync::Lazy;

use crate::user::{User, UserRecord, UserResponse, UserSummary};

/// Register all domain mapping pairs on the given instance.
pub fn register_mappings(mapper: &Mapper) -> MapResult<()> {
    // Persistence <-> entity, both directions.
    mapper.create_map::<UserRecord, User>()?;
    mapper.create_map::<User, UserRecord>()?;

    // Entity -> client response.
    mapper.create_map::<User, UserResponse>()?;

    // Listing summary is not a field-by-field shape; a custom function
    // supplies the whole conversion.
    mapper.create_custom_map::<User, UserSummary>(|user| UserSummary {
        id: user.id,
        display: format!("{} <{}>", user.name, user.email),
        admin: user.is_admin(),
    })?;

    Ok(())
}

/// Shared, fully-configured mapper instance.
pub fn mapper() -> &'static Mapper {
    static MAPPER: Lazy<Mapper> = Lazy::new(|| {
        let mapper = Mapper::new();
        register_mappings(&mapper).expect("domain mapping configuration is valid");
        mapper
    });
    &MAPPER
}
