//! Mapping registry.
//!
//! An explicit [`Mapper`] instance owns the registration and profile
//! tables; construct one at startup, register every pair, then share it
//! (an `Arc`, or a `once_cell` static) with repositories and handlers.
//! Registration takes the write lock, `map` takes the read lock, so the
//! configure-then-serve pattern is safe under concurrent traffic.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::engine;
use crate::error::{MapResult, MapperError};
use crate::profile::{self, MappingKey, Profile};
use crate::reflect::Reflect;

/// How unmatched fields and incompatible kinds are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    /// Drop-and-continue: unmatched source fields are absent from the
    /// profile and kind mismatches leave the destination default.
    /// Existing callers depend on partial mapping success.
    #[default]
    Lenient,
    /// Fail fast at registration (unmatched field) and at conversion
    /// (incompatible kinds, unregistered nested pair).
    Strict,
}

/// One registered conversion: automatic (profile-driven) or a caller
/// supplied function that replaces the engine for its exact pair.
enum Entry {
    Auto,
    Custom(Arc<dyn Any + Send + Sync>),
}

/// Typed holder behind the type-erased custom entry; recovered by
/// downcast with the call site's concrete types.
struct CustomFn<S, D> {
    func: Box<dyn Fn(&S) -> D + Send + Sync>,
}

#[derive(Default)]
struct Tables {
    entries: HashMap<MappingKey, Entry>,
    profiles: HashMap<MappingKey, Profile>,
}

/// Object-to-object mapping registry and conversion front door.
pub struct Mapper {
    mode: MapMode,
    tables: RwLock<Tables>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Create a lenient mapper.
    pub fn new() -> Self {
        Self::with_mode(MapMode::Lenient)
    }

    /// Create a mapper with an explicit mode.
    pub fn with_mode(mode: MapMode) -> Self {
        Self {
            mode,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Mode this mapper was built with.
    pub fn mode(&self) -> MapMode {
        self.mode
    }

    /// Register an automatic mapping from `S` to `D`.
    ///
    /// Both sides must be struct-shaped after stripping at most one
    /// optional indirection. The pair is keyed by its underlying struct
    /// types, so the one registration also serves optional, boxed, and
    /// collection call sites.
    ///
    /// # Errors
    /// * [`MapperError::UnsupportedMap`] when either side is not
    ///   struct-shaped.
    /// * [`MapperError::MapAlreadyExists`] on duplicate registration.
    /// * [`MapperError::UnmatchedField`] in strict mode when a source
    ///   field has no destination correspondence.
    pub fn create_map<S, D>(&self) -> MapResult<()>
    where
        S: Reflect,
        D: Reflect,
    {
        let (src, dst) = match (
            S::shape().underlying_struct(),
            D::shape().underlying_struct(),
        ) {
            (Some(src), Some(dst)) => (src, dst),
            _ => {
                return Err(MapperError::unsupported_map(
                    std::any::type_name::<S>(),
                    std::any::type_name::<D>(),
                ));
            }
        };

        // Identical types already copy directly; a registration would
        // never be consulted.
        if src.name == dst.name {
            return Err(MapperError::unsupported_map(src.name, dst.name));
        }

        let key: MappingKey = (src.name, dst.name);
        let mut tables = self.write_tables();
        if tables.entries.contains_key(&key) {
            return Err(MapperError::map_already_exists(key.0, key.1));
        }

        let profile = profile::build(&src, &dst, self.mode)?;
        debug!(
            src = key.0,
            dst = key.1,
            fields = profile.entries.len(),
            "registered automatic mapping"
        );
        tables.profiles.insert(key, profile);
        tables.entries.insert(key, Entry::Auto);
        Ok(())
    }

    /// Register a custom conversion function for the exact pair `(S, D)`.
    ///
    /// No profile is built; `f` supplies the whole conversion, including
    /// any `None` handling. The function is only invoked for calls whose
    /// concrete types match `S` and `D` exactly; applying an element
    /// function across a collection stays the caller's responsibility.
    ///
    /// # Errors
    /// * [`MapperError::UnsupportedMap`] when either side is not
    ///   struct-shaped.
    /// * [`MapperError::MapAlreadyExists`] on duplicate registration.
    pub fn create_custom_map<S, D>(
        &self,
        f: impl Fn(&S) -> D + Send + Sync + 'static,
    ) -> MapResult<()>
    where
        S: Reflect,
        D: Reflect,
    {
        let (src, dst) = match (
            S::shape().underlying_struct(),
            D::shape().underlying_struct(),
        ) {
            (Some(src), Some(dst)) => (src, dst),
            _ => {
                return Err(MapperError::unsupported_map(
                    std::any::type_name::<S>(),
                    std::any::type_name::<D>(),
                ));
            }
        };

        let key: MappingKey = (src.name, dst.name);
        let mut tables = self.write_tables();
        if tables.entries.contains_key(&key) {
            return Err(MapperError::map_already_exists(key.0, key.1));
        }

        debug!(src = key.0, dst = key.1, "registered custom mapping");
        tables.entries.insert(
            key,
            Entry::Custom(Arc::new(CustomFn::<S, D> { func: Box::new(f) })),
        );
        Ok(())
    }

    /// Convert `src` into a freshly-allocated `D`.
    ///
    /// A custom entry for the exact call types wins; otherwise the
    /// recursive engine converts through the registered profile.
    ///
    /// # Errors
    /// [`MapperError::MapNotExist`] when no entry is registered for the
    /// pair (including after [`Mapper::clear_mappings`]); strict-mode
    /// conversion failures propagate from the engine.
    pub fn map<S, D>(&self, src: &S) -> MapResult<D>
    where
        S: Reflect,
        D: Reflect,
    {
        let not_exist = || {
            MapperError::map_not_exist(std::any::type_name::<S>(), std::any::type_name::<D>())
        };

        let key: MappingKey = match (S::shape().mapping_name(), D::shape().mapping_name()) {
            (Some(src_name), Some(dst_name)) => (src_name, dst_name),
            _ => return Err(not_exist()),
        };

        let tables = self.read_tables();
        match tables.entries.get(&key) {
            Some(Entry::Custom(entry)) => match entry.downcast_ref::<CustomFn<S, D>>() {
                Some(custom) => Ok((custom.func)(src)),
                // Registered under different concrete wrappers than the
                // call site used; the exact pair is what counts.
                None => Err(not_exist()),
            },
            Some(Entry::Auto) => {
                let value = src.to_value();
                let converted = engine::convert(&value, &D::shape(), &tables.profiles, self.mode)?;
                Ok(D::from_value(&converted))
            }
            None => Err(not_exist()),
        }
    }

    /// Atomically drop every registration and profile.
    ///
    /// Test/diagnostic use; production traffic is expected to run against
    /// a fully-configured instance.
    pub fn clear_mappings(&self) {
        let mut tables = self.write_tables();
        tables.entries.clear();
        tables.profiles.clear();
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Plain {
        n: i64,
    }

    crate::reflect_struct!(Plain { n: i64 });

    #[test]
    fn test_non_struct_pair_is_unsupported() {
        let mapper = Mapper::new();
        let err = mapper.create_map::<i64, Plain>().unwrap_err();
        assert!(matches!(err, MapperError::UnsupportedMap { .. }));

        let err = mapper
            .create_custom_map::<Plain, i64>(|p| p.n)
            .unwrap_err();
        assert!(matches!(err, MapperError::UnsupportedMap { .. }));
    }

    #[test]
    fn test_identical_pair_is_unsupported() {
        let mapper = Mapper::new();
        let err = mapper.create_map::<Plain, Plain>().unwrap_err();
        assert!(matches!(err, MapperError::UnsupportedMap { .. }));

        let err = mapper.create_map::<Plain, Option<Plain>>().unwrap_err();
        assert!(matches!(err, MapperError::UnsupportedMap { .. }));
    }

    #[test]
    fn test_doubly_wrapped_pair_is_unsupported() {
        // At most one optional indirection on either side.
        let mapper = Mapper::new();
        let err = mapper
            .create_map::<Option<Option<Plain>>, Plain>()
            .unwrap_err();
        assert!(matches!(err, MapperError::UnsupportedMap { .. }));
    }

    #[test]
    fn test_mapper_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mapper>();
    }
}
