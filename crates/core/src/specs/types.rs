use crate::model::ShapeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// TypeScript type emitted for an entity field.
///
/// Collections and nested structures stay shallow: handlers treat entity
/// bodies as flat records for the key-value store, so element and member
/// types are not inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeToken {
    String,
    Number,
    Boolean,
    AnyArray,
    Record,
    Any,
}

impl TypeToken {
    /// Map a resolved shape kind to its TypeScript token
    pub fn from_shape(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::String => Self::String,
            ShapeKind::Integer
            | ShapeKind::Long
            | ShapeKind::Byte
            | ShapeKind::Short
            | ShapeKind::Double
            | ShapeKind::Float => Self::Number,
            ShapeKind::Boolean => Self::Boolean,
            // ISO-8601 text on the wire
            ShapeKind::Timestamp => Self::String,
            ShapeKind::List | ShapeKind::Set => Self::AnyArray,
            ShapeKind::Map | ShapeKind::Structure => Self::Record,
            _ => Self::Any,
        }
    }

    pub fn as_ts(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::AnyArray => "any[]",
            Self::Record => "Record<string, any>",
            Self::Any => "any",
        }
    }
}

impl From<ShapeKind> for TypeToken {
    fn from(kind: ShapeKind) -> Self {
        Self::from_shape(kind)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ts())
    }
}
