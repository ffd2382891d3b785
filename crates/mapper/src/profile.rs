//! Field-correspondence profiles.
//!
//! A profile is computed once per automatic mapping pair, at registration
//! time; conversion replays it without re-matching. Matching walks a
//! fallback chain per source field and the first rule wins:
//!
//! 1. source name == destination name
//! 2. PascalCase(source name) == destination name
//! 3. source name == destination tag
//! 4. source tag == destination name
//! 5. source tag == destination tag
//!
//! In lenient mode an unmatched source field is dropped from the profile
//! (debug-logged, never an error); in strict mode registration fails.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{MapResult, MapperError};
use crate::reflect::{FieldShape, StructShape};
use crate::registry::MapMode;

/// Canonical registration key: fully-qualified names of the underlying
/// struct types, after pointer/value normalization.
pub(crate) type MappingKey = (&'static str, &'static str);

/// Ordered source-field to destination-field correspondences for one
/// automatic mapping pair.
#[derive(Debug, Clone, Default)]
pub(crate) struct Profile {
    pub entries: Vec<(&'static str, &'static str)>,
}

/// Destination-side lookup tables, built once per profile construction.
struct FieldMeta {
    by_name: HashMap<&'static str, &'static str>,
    by_tag: HashMap<&'static str, &'static str>,
}

impl FieldMeta {
    fn of(shape: &StructShape) -> Self {
        let mut by_name = HashMap::with_capacity(shape.fields.len());
        let mut by_tag = HashMap::new();
        for field in &shape.fields {
            by_name.insert(field.name, field.name);
            if let Some(tag) = field.tag {
                by_tag.insert(tag, field.name);
            }
        }
        Self { by_name, by_tag }
    }
}

/// Build the profile for one source/destination struct pair.
pub(crate) fn build(src: &StructShape, dst: &StructShape, mode: MapMode) -> MapResult<Profile> {
    let meta = FieldMeta::of(dst);
    let mut entries = Vec::with_capacity(src.fields.len());

    for field in &src.fields {
        match match_field(field, &meta) {
            Some(dst_name) => entries.push((field.name, dst_name)),
            None if mode == MapMode::Strict => {
                return Err(MapperError::unmatched_field(src.name, field.name));
            }
            None => {
                debug!(
                    source = src.name,
                    field = field.name,
                    "no destination correspondence, field dropped"
                );
            }
        }
    }

    Ok(Profile { entries })
}

fn match_field(field: &FieldShape, meta: &FieldMeta) -> Option<&'static str> {
    if let Some(&name) = meta.by_name.get(field.name) {
        return Some(name);
    }
    if let Some(&name) = meta.by_name.get(to_pascal_case(field.name).as_str()) {
        return Some(name);
    }
    if let Some(&name) = meta.by_tag.get(field.name) {
        return Some(name);
    }
    if let Some(tag) = field.tag {
        if let Some(&name) = meta.by_name.get(tag) {
            return Some(name);
        }
        if let Some(&name) = meta.by_tag.get(tag) {
            return Some(name);
        }
    }
    None
}

/// Convert `snake_case` to `PascalCase` ("user_name" -> "UserName").
fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
