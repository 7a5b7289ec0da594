//! Boundary between the generator and whatever model representation hosts it.
//!
//! The generator only needs to list structures carrying a marker, read the
//! marker's values and enumerate a structure's members with resolved kinds.
//! [`SmithyModel`] implements this against the Smithy JSON AST.

pub mod shape;
pub mod smithy;

pub use shape::ShapeKind;
pub use smithy::SmithyModel;

use crate::errors::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A structure shape that may become an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralDeclaration {
    /// Absolute shape id, e.g. `demo.tasks#Task`
    pub id: String,
    /// Simple name, e.g. `Task`
    pub name: String,
}

impl StructuralDeclaration {
    /// Build a declaration from an absolute shape id, taking the part after `#` as the name
    pub fn from_shape_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = match id.rsplit_once('#') {
            Some((_, name)) => name.to_string(),
            None => id.clone(),
        };
        Self { id, name }
    }
}

/// A member of a structure with its resolved target kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: ShapeKind,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Read access to the values of an applied marker
pub trait MarkerNode {
    /// Return the string value of `key`, failing when it is absent, empty or not a string
    fn require_string(&self, key: &str) -> Result<String>;

    /// Return the string value of `key`, or `default` when it is absent
    fn string_or(&self, key: &str, default: &str) -> Result<String>;
}

/// The capabilities the generator needs from a model
pub trait ModelAccessor {
    /// All structures carrying `marker_id`, ordered by shape id
    fn list_annotated_structures(&self, marker_id: &str) -> Vec<StructuralDeclaration>;

    /// The marker value applied to `decl`, if any
    fn marker(&self, decl: &StructuralDeclaration, marker_id: &str) -> Option<&dyn MarkerNode>;

    /// Every member of `decl` with its resolved kind, in whatever order the model keeps them
    fn members(&self, decl: &StructuralDeclaration) -> Result<Vec<Member>>;
}

impl MarkerNode for serde_json::Value {
    fn require_string(&self, key: &str) -> Result<String> {
        let object = self
            .as_object()
            .ok_or_else(|| CoreError::configuration("marker value must be an object"))?;

        match object.get(key) {
            None | Some(serde_json::Value::Null) => Err(CoreError::configuration(format!(
                "marker member `{}` is required",
                key
            ))),
            Some(serde_json::Value::String(s)) if s.is_empty() => Err(CoreError::configuration(
                format!("marker member `{}` must not be empty", key),
            )),
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(CoreError::configuration(format!(
                "marker member `{}` must be a string, found {}",
                key, other
            ))),
        }
    }

    fn string_or(&self, key: &str, default: &str) -> Result<String> {
        let object = self
            .as_object()
            .ok_or_else(|| CoreError::configuration("marker value must be an object"))?;

        match object.get(key) {
            None | Some(serde_json::Value::Null) => Ok(default.to_string()),
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(CoreError::configuration(format!(
                "marker member `{}` must be a string, found {}",
                key, other
            ))),
        }
    }
}
