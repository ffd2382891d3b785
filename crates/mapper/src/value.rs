//! Dynamic value model.
//!
//! A [`Value`] is the reflected form of a source object: the conversion
//! engine walks this tree instead of the concrete type, which keeps kind
//! dispatch (struct/list/map/optional/scalar) explicit and testable.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Reflected runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No conversion applied; the destination field keeps its default.
    Skip,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    /// Nullable indirection (`Option<T>`); `None` models a nil pointer.
    Optional(Option<Box<Value>>),
    List(Vec<Value>),
    /// Key/value entries; iteration order follows the source container.
    Map(Vec<(Value, Value)>),
    Struct(StructValue),
}

/// Reflected struct: fully-qualified type name plus named field values
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub type_name: &'static str,
    pub fields: Vec<(&'static str, Value)>,
}

impl StructValue {
    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

impl Value {
    /// Kind label used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Skip => "skip",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::DateTime(_) => "datetime",
            Value::Optional(_) => "optional",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Struct(s) => s.type_name,
        }
    }
}
