use super::marker::EntityMarker;
use super::types::TypeToken;
use crate::errors::{CoreError, Result};
use crate::model::{Member, ModelAccessor, StructuralDeclaration};
use serde::{Deserialize, Serialize};

/// A single entity field with its mapped TypeScript type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub mapped_type: TypeToken,
}

/// Normalized view of one marked structure, ready for templating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    /// `name` with its first character lowercased, used in messages
    pub alias: String,
    pub table_name: String,
    pub hash_key: String,
    /// Sorted by name, byte-wise
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Combine a declaration, its parsed marker and its members.
    ///
    /// Every member becomes a field, including the hash key itself.
    pub fn build(decl: &StructuralDeclaration, marker: EntityMarker, members: Vec<Member>) -> Self {
        let mut fields: Vec<FieldDescriptor> = members
            .into_iter()
            .map(|member| FieldDescriptor {
                name: member.name,
                mapped_type: TypeToken::from_shape(member.kind),
            })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            name: decl.name.clone(),
            alias: lower_first(&decl.name),
            table_name: marker.table_name,
            hash_key: marker.hash_key,
            fields,
        }
    }

    /// Parse the marker on `decl` and resolve its members through `model`
    pub fn from_model<M>(model: &M, decl: &StructuralDeclaration, marker_id: &str) -> Result<Self>
    where
        M: ModelAccessor + ?Sized,
    {
        let node = model.marker(decl, marker_id).ok_or_else(|| {
            CoreError::configuration(format!("{}: marker `{}` is not applied", decl.id, marker_id))
        })?;
        let marker = EntityMarker::parse(&decl.id, node)?;
        let members = model.members(decl)?;

        Ok(Self::build(decl, marker, members))
    }

    pub fn create_symbol(&self) -> String {
        format!("create{}", self.name)
    }

    pub fn list_symbol(&self) -> String {
        format!("list{}s", self.name)
    }

    pub fn get_symbol(&self) -> String {
        format!("get{}", self.name)
    }

    pub fn update_symbol(&self) -> String {
        format!("update{}", self.name)
    }

    pub fn delete_symbol(&self) -> String {
        format!("delete{}", self.name)
    }
}

/// Lowercase exactly the first character; the empty string stays empty
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
