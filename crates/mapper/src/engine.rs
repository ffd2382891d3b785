//! Recursive conversion engine.
//!
//! Walks a reflected source [`Value`] against a destination [`Shape`],
//! dispatching on the (value kind, shape kind) pair. Structs replay the
//! precomputed profile for their pair; lists and maps recurse element by
//! element; optional indirection is reconciled here, so one registration
//! serves value, optional, boxed, and collection call sites.

use std::collections::HashMap;
use tracing::trace;

use crate::error::{MapResult, MapperError};
use crate::profile::{MappingKey, Profile};
use crate::reflect::{ScalarKind, Shape, StructShape};
use crate::registry::MapMode;
use crate::value::{StructValue, Value};

pub(crate) fn convert(
    value: &Value,
    shape: &Shape,
    profiles: &HashMap<MappingKey, Profile>,
    mode: MapMode,
) -> MapResult<Value> {
    match (value, shape) {
        (Value::Skip, _) => Ok(Value::Skip),

        // Nil propagation: "no entity" maps to "no DTO" without an
        // explicit check at the call site.
        (Value::Optional(None), Shape::Optional(_)) => Ok(Value::Optional(None)),
        (Value::Optional(None), _) => skip_or_fail(value, shape, mode),
        (Value::Optional(Some(inner)), Shape::Optional(dst)) => Ok(Value::Optional(Some(
            Box::new(convert(inner, &dst(), profiles, mode)?),
        ))),
        // Pointer-ness mismatches are resolved in place: unwrap a present
        // source, wrap a non-optional one.
        (Value::Optional(Some(inner)), _) => convert(inner, shape, profiles, mode),
        (_, Shape::Optional(dst)) => Ok(Value::Optional(Some(Box::new(convert(
            value,
            &dst(),
            profiles,
            mode,
        )?)))),

        (Value::Struct(src), Shape::Struct(dst)) => convert_struct(src, dst, profiles, mode),

        (Value::List(items), Shape::List(element)) => {
            let element = element();
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(convert(item, &element, profiles, mode)?);
            }
            Ok(Value::List(out))
        }

        (Value::Map(entries), Shape::Map(key_shape, value_shape)) => {
            let (key_shape, value_shape) = (key_shape(), value_shape());
            let mut out = Vec::with_capacity(entries.len());
            for (key, val) in entries {
                out.push((
                    convert(key, &key_shape, profiles, mode)?,
                    convert(val, &value_shape, profiles, mode)?,
                ));
            }
            Ok(Value::Map(out))
        }

        (_, Shape::Scalar(kind)) if scalar_matches(value, *kind) => Ok(value.clone()),

        // Kind mismatch: lenient keeps the destination default, strict
        // fails fast.
        _ => skip_or_fail(value, shape, mode),
    }
}

fn convert_struct(
    src: &StructValue,
    dst: &StructShape,
    profiles: &HashMap<MappingKey, Profile>,
    mode: MapMode,
) -> MapResult<Value> {
    // Identical types copy directly; no profile is involved.
    if src.type_name == dst.name {
        return Ok(Value::Struct(src.clone()));
    }

    let key: MappingKey = (src.type_name, dst.name);
    let Some(profile) = profiles.get(&key) else {
        return match mode {
            MapMode::Strict => Err(MapperError::map_not_exist(src.type_name, dst.name)),
            MapMode::Lenient => {
                trace!(src = key.0, dst = key.1, "no profile for nested pair");
                Ok(Value::Struct(StructValue {
                    type_name: dst.name,
                    fields: Vec::new(),
                }))
            }
        };
    };

    let mut fields = Vec::with_capacity(profile.entries.len());
    for (src_name, dst_name) in &profile.entries {
        let Some(field_value) = src.field(src_name) else {
            continue;
        };
        let Some(field_shape) = dst.field(dst_name) else {
            continue;
        };
        let converted = convert(field_value, &(field_shape.shape)(), profiles, mode)?;
        fields.push((*dst_name, converted));
    }

    Ok(Value::Struct(StructValue {
        type_name: dst.name,
        fields,
    }))
}

fn scalar_matches(value: &Value, kind: ScalarKind) -> bool {
    matches!(
        (value, kind),
        (Value::Bool(_), ScalarKind::Bool)
            | (Value::Int(_), ScalarKind::Int)
            | (Value::UInt(_), ScalarKind::UInt)
            | (Value::Float(_), ScalarKind::Float)
            | (Value::Str(_), ScalarKind::Str)
            | (Value::Uuid(_), ScalarKind::Uuid)
            | (Value::DateTime(_), ScalarKind::DateTime)
    )
}

fn skip_or_fail(value: &Value, shape: &Shape, mode: MapMode) -> MapResult<Value> {
    match mode {
        MapMode::Lenient => {
            trace!(
                src = value.kind_name(),
                dst = shape.kind_name(),
                "incompatible kinds, destination keeps default"
            );
            Ok(Value::Skip)
        }
        MapMode::Strict => Err(MapperError::incompatible_kinds(
            value.kind_name(),
            shape.kind_name(),
        )),
    }
}
