//! Type shapes and the [`Reflect`] trait.
//!
//! Rust has no ambient runtime reflection, so mappable types describe
//! themselves: a [`Shape`] is the static description of a type (what the
//! engine needs to fill a destination), while [`crate::Value`] is the
//! dynamic form of a source object. Scalars and standard containers are
//! covered here; user structs implement [`Reflect`] through the
//! [`reflect_struct!`](crate::reflect_struct) macro.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use uuid::Uuid;

use crate::value::Value;

/// Scalar categories; conversion copies only between identical kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Uuid,
    DateTime,
}

/// Static description of a mappable type.
///
/// Containers reference their element shapes through `fn() -> Shape`
/// pointers, which keeps the description buildable from generic impls
/// and makes cyclic shapes unrepresentable.
#[derive(Debug, Clone)]
pub enum Shape {
    Scalar(ScalarKind),
    Struct(StructShape),
    Optional(fn() -> Shape),
    List(fn() -> Shape),
    Map(fn() -> Shape, fn() -> Shape),
}

/// Struct description: fully-qualified name plus ordered fields.
#[derive(Debug, Clone)]
pub struct StructShape {
    pub name: &'static str,
    pub fields: Vec<FieldShape>,
}

/// One struct field: name, optional mapping tag, and the field's shape.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub name: &'static str,
    pub tag: Option<&'static str>,
    pub shape: fn() -> Shape,
}

impl StructShape {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Shape {
    /// Underlying struct after stripping at most one optional indirection.
    ///
    /// Registration requires both sides of a pair to resolve here.
    pub fn underlying_struct(&self) -> Option<StructShape> {
        match self {
            Shape::Struct(shape) => Some(shape.clone()),
            Shape::Optional(inner) => match inner() {
                Shape::Struct(shape) => Some(shape),
                _ => None,
            },
            _ => None,
        }
    }

    /// Fully-qualified name of the struct this shape ultimately carries,
    /// looking through optionals, lists, and map values. This is the
    /// lookup side of pointer/value normalization: one registration
    /// serves value, optional, and collection call sites.
    pub fn mapping_name(&self) -> Option<&'static str> {
        match self {
            Shape::Struct(shape) => Some(shape.name),
            Shape::Optional(inner) | Shape::List(inner) => inner().mapping_name(),
            Shape::Map(_, value) => value().mapping_name(),
            Shape::Scalar(_) => None,
        }
    }

    /// Kind label used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Scalar(ScalarKind::Bool) => "bool",
            Shape::Scalar(ScalarKind::Int) => "int",
            Shape::Scalar(ScalarKind::UInt) => "uint",
            Shape::Scalar(ScalarKind::Float) => "float",
            Shape::Scalar(ScalarKind::Str) => "string",
            Shape::Scalar(ScalarKind::Uuid) => "uuid",
            Shape::Scalar(ScalarKind::DateTime) => "datetime",
            Shape::Struct(shape) => shape.name,
            Shape::Optional(_) => "optional",
            Shape::List(_) => "list",
            Shape::Map(_, _) => "map",
        }
    }
}

/// Bridge between a concrete type and the dynamic value/shape models.
///
/// `from_value` is total: values of the wrong kind fall back to the
/// type's default, which is what lenient conversion relies on. Strict
/// mode rejects mismatches inside the engine before materialization.
pub trait Reflect: Sized + 'static {
    /// Shape of this type.
    fn shape() -> Shape;

    /// Reflect a concrete value into the dynamic model.
    fn to_value(&self) -> Value;

    /// Materialize a concrete value from the dynamic model.
    fn from_value(value: &Value) -> Self;
}

macro_rules! reflect_scalar {
    ($kind:ident, $variant:ident, $($ty:ty),+) => {
        $(impl Reflect for $ty {
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::$kind)
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self as _)
            }

            fn from_value(value: &Value) -> Self {
                match value {
                    Value::$variant(v) => *v as _,
                    _ => Self::default(),
                }
            }
        })+
    };
}

reflect_scalar!(Int, Int, i8, i16, i32, i64, isize);
reflect_scalar!(UInt, UInt, u8, u16, u32, u64, usize);
reflect_scalar!(Float, Float, f32, f64);

impl Reflect for bool {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(v) => *v,
            _ => false,
        }
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Str)
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Str(v) => v.clone(),
            _ => String::new(),
        }
    }
}

impl Reflect for Uuid {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Uuid)
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Uuid(v) => *v,
            _ => Uuid::nil(),
        }
    }
}

impl Reflect for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::DateTime)
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::DateTime(v) => *v,
            _ => DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(T::shape)
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.to_value())))
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Optional(Some(inner)) => Some(T::from_value(inner)),
            Value::Optional(None) | Value::Skip => None,
            other => Some(T::from_value(other)),
        }
    }
}

/// `Box` is shape-transparent: the pointer analog with no null state,
/// resolved entirely at conversion time.
impl<T: Reflect> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Self {
        Box::new(T::from_value(value))
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> Shape {
        Shape::List(T::shape)
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

impl<K, V> Reflect for HashMap<K, V>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
{
    fn shape() -> Shape {
        Shape::Map(K::shape, V::shape)
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.to_value(), value.to_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(key, value)| (K::from_value(key), V::from_value(value)))
                .collect(),
            _ => HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip() {
        assert_eq!(i32::from_value(&42i32.to_value()), 42);
        assert_eq!(String::from_value(&"hi".to_string().to_value()), "hi");
        assert!(bool::from_value(&true.to_value()));
    }

    #[test]
    fn test_scalar_mismatch_falls_back_to_default() {
        assert_eq!(i64::from_value(&Value::Str("7".into())), 0);
        assert_eq!(String::from_value(&Value::Int(7)), "");
        assert_eq!(Uuid::from_value(&Value::Skip), Uuid::nil());
    }

    #[test]
    fn test_optional_shape_strips_to_struct_name() {
        assert!(Option::<i64>::shape().underlying_struct().is_none());
        assert_eq!(Vec::<i64>::shape().mapping_name(), None);
    }

    #[test]
    fn test_option_value_model() {
        let none: Option<i64> = None;
        assert_eq!(none.to_value(), Value::Optional(None));
        assert_eq!(Option::<i64>::from_value(&Value::Optional(None)), None);
        assert_eq!(
            Option::<i64>::from_value(&Value::Optional(Some(Box::new(Value::Int(3))))),
            Some(3)
        );
    }
}
