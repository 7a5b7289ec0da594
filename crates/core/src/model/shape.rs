use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a resolved member target in the structural type system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Blob,
    Boolean,
    String,
    Timestamp,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Document,
    Enum,
    IntEnum,
    List,
    Set,
    Map,
    Structure,
    Union,
    Member,
    Service,
    Resource,
    Operation,
}

impl ShapeKind {
    /// Parse a shape type name as it appears in the Smithy JSON AST
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "blob" => Self::Blob,
            "boolean" => Self::Boolean,
            "string" => Self::String,
            "timestamp" => Self::Timestamp,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "bigInteger" => Self::BigInteger,
            "bigDecimal" => Self::BigDecimal,
            "document" => Self::Document,
            "enum" => Self::Enum,
            "intEnum" => Self::IntEnum,
            "list" => Self::List,
            "set" => Self::Set,
            "map" => Self::Map,
            "structure" => Self::Structure,
            "union" => Self::Union,
            "member" => Self::Member,
            "service" => Self::Service,
            "resource" => Self::Resource,
            "operation" => Self::Operation,
            _ => return None,
        };
        Some(kind)
    }

    /// Resolve a `smithy.api#` prelude shape name to its kind
    pub fn from_prelude(name: &str) -> Option<Self> {
        let kind = match name {
            "String" => Self::String,
            "Blob" => Self::Blob,
            "Boolean" | "PrimitiveBoolean" => Self::Boolean,
            "Byte" | "PrimitiveByte" => Self::Byte,
            "Short" | "PrimitiveShort" => Self::Short,
            "Integer" | "PrimitiveInteger" => Self::Integer,
            "Long" | "PrimitiveLong" => Self::Long,
            "Float" | "PrimitiveFloat" => Self::Float,
            "Double" | "PrimitiveDouble" => Self::Double,
            "BigInteger" => Self::BigInteger,
            "BigDecimal" => Self::BigDecimal,
            "Timestamp" => Self::Timestamp,
            "Document" => Self::Document,
            "Unit" => Self::Structure,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInteger => "bigInteger",
            Self::BigDecimal => "bigDecimal",
            Self::Document => "document",
            Self::Enum => "enum",
            Self::IntEnum => "intEnum",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Structure => "structure",
            Self::Union => "union",
            Self::Member => "member",
            Self::Service => "service",
            Self::Resource => "resource",
            Self::Operation => "operation",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_round_trip() {
        for name in ["string", "bigDecimal", "intEnum", "structure", "set"] {
            let kind = ShapeKind::from_type_name(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!(ShapeKind::from_type_name("Structure"), None);
    }

    #[test]
    fn test_prelude_primitives() {
        assert_eq!(ShapeKind::from_prelude("PrimitiveLong"), Some(ShapeKind::Long));
        assert_eq!(ShapeKind::from_prelude("Timestamp"), Some(ShapeKind::Timestamp));
        assert_eq!(ShapeKind::from_prelude("Nope"), None);
    }
}
