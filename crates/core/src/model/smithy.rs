use super::{MarkerNode, Member, ModelAccessor, ShapeKind, StructuralDeclaration};
use crate::errors::{CoreError, Result};
use serde::Deserialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const PRELUDE_NAMESPACE: &str = "smithy.api";
const APPLY_TYPE: &str = "apply";
const MIXIN_TRAIT: &str = "smithy.api#mixin";

/// A model assembled from one or more Smithy JSON AST documents
#[derive(Debug, Clone, Default)]
pub struct SmithyModel {
    shapes: BTreeMap<String, AstShape>,
}

#[derive(Debug, Clone, Deserialize)]
struct AstDocument {
    smithy: String,
    #[serde(default)]
    shapes: BTreeMap<String, AstShape>,
}

#[derive(Debug, Clone, Deserialize)]
struct AstShape {
    #[serde(rename = "type")]
    shape_type: String,
    #[serde(default)]
    members: BTreeMap<String, AstReference>,
    #[serde(default)]
    mixins: Vec<AstReference>,
    #[serde(default)]
    traits: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct AstReference {
    target: String,
}

impl SmithyModel {
    /// Parse a single JSON AST document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut model = Self::default();
        model.merge_json(json)?;
        Ok(model)
    }

    /// Load a single JSON AST file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_files(&[path])
    }

    /// Load and merge several JSON AST files, in order
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut model = Self::default();
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)?;
            model.merge_json(&content).map_err(|e| match e {
                CoreError::Model { message } => {
                    CoreError::model(format!("{}: {}", path.display(), message))
                }
                other => other,
            })?;
            tracing::debug!("Loaded model file {}", path.display());
        }
        Ok(model)
    }

    /// Merge another JSON AST document into this model.
    ///
    /// `apply` entries add their traits to the shape they name, whichever
    /// document defines it, so file order does not matter.
    pub fn merge_json(&mut self, json: &str) -> Result<()> {
        let document: AstDocument = serde_json::from_str(json)?;
        if !(document.smithy.starts_with('1') || document.smithy.starts_with('2')) {
            return Err(CoreError::model(format!(
                "unsupported smithy version `{}`",
                document.smithy
            )));
        }

        for (id, shape) in document.shapes {
            if shape.shape_type == APPLY_TYPE {
                match self.shapes.entry(id) {
                    Entry::Occupied(mut existing) => {
                        existing.get_mut().traits.extend(shape.traits);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(shape);
                    }
                }
                continue;
            }

            match self.shapes.get_mut(&id) {
                // a pending `apply` arrived first; keep its traits
                Some(existing) if existing.shape_type == APPLY_TYPE => {
                    let mut shape = shape;
                    let applied = std::mem::take(&mut existing.traits);
                    shape.traits.extend(applied);
                    *existing = shape;
                }
                Some(_) => {
                    return Err(CoreError::model(format!("shape `{}` is defined twice", id)));
                }
                None => {
                    self.shapes.insert(id, shape);
                }
            }
        }

        Ok(())
    }

    /// Number of shapes defined in the model, excluding unresolved `apply` entries
    pub fn shape_count(&self) -> usize {
        self.shapes
            .values()
            .filter(|s| s.shape_type != APPLY_TYPE)
            .count()
    }

    fn resolve_kind(&self, target: &str) -> Result<ShapeKind> {
        if let Some(shape) = self.shapes.get(target) {
            return ShapeKind::from_type_name(&shape.shape_type).ok_or_else(|| {
                CoreError::model(format!(
                    "shape `{}` has unknown type `{}`",
                    target, shape.shape_type
                ))
            });
        }

        match target.split_once('#') {
            Some((PRELUDE_NAMESPACE, name)) => ShapeKind::from_prelude(name).ok_or_else(|| {
                CoreError::model(format!("unknown prelude shape `{}`", target))
            }),
            _ => Err(CoreError::model(format!(
                "member target `{}` cannot be resolved",
                target
            ))),
        }
    }

    fn collect_members(
        &self,
        id: &str,
        visiting: &mut BTreeSet<String>,
        out: &mut BTreeMap<String, ShapeKind>,
    ) -> Result<()> {
        if !visiting.insert(id.to_string()) {
            return Err(CoreError::model(format!("mixin cycle through `{}`", id)));
        }

        let shape = self
            .shapes
            .get(id)
            .filter(|s| s.shape_type != APPLY_TYPE)
            .ok_or_else(|| CoreError::model(format!("shape `{}` is not defined", id)))?;

        // mixin members first so locally declared members win
        for mixin in &shape.mixins {
            self.collect_members(&mixin.target, visiting, out)?;
        }

        for (name, member) in &shape.members {
            out.insert(name.clone(), self.resolve_kind(&member.target)?);
        }

        visiting.remove(id);
        Ok(())
    }

    /// The value of `trait_id` on `id`, either applied directly or inherited
    /// from a mixin. Local traits win, then later mixins over earlier ones.
    fn find_trait<'a>(
        &'a self,
        id: &str,
        trait_id: &str,
        visiting: &mut BTreeSet<String>,
    ) -> Option<&'a serde_json::Value> {
        if !visiting.insert(id.to_string()) {
            return None;
        }

        let found = self.shapes.get(id).and_then(|shape| {
            shape.traits.get(trait_id).or_else(|| {
                shape
                    .mixins
                    .iter()
                    .rev()
                    .filter(|mixin| !self.is_local_trait(&mixin.target, trait_id))
                    .find_map(|mixin| self.find_trait(&mixin.target, trait_id, visiting))
            })
        });

        visiting.remove(id);
        found
    }

    /// Whether `mixin_id` lists `trait_id` in its `localTraits`, keeping it off shapes that use it
    fn is_local_trait(&self, mixin_id: &str, trait_id: &str) -> bool {
        self.shapes
            .get(mixin_id)
            .and_then(|shape| shape.traits.get(MIXIN_TRAIT))
            .and_then(|mixin| mixin.get("localTraits"))
            .and_then(|locals| locals.as_array())
            .is_some_and(|locals| locals.iter().any(|t| t.as_str() == Some(trait_id)))
    }
}

impl ModelAccessor for SmithyModel {
    fn list_annotated_structures(&self, marker_id: &str) -> Vec<StructuralDeclaration> {
        self.shapes
            .iter()
            .filter(|(_, shape)| shape.shape_type == "structure")
            // mixins only lend their members and traits
            .filter(|(_, shape)| !shape.traits.contains_key(MIXIN_TRAIT))
            .filter(|(id, _)| self.find_trait(id, marker_id, &mut BTreeSet::new()).is_some())
            .map(|(id, _)| StructuralDeclaration::from_shape_id(id.as_str()))
            .collect()
    }

    fn marker(&self, decl: &StructuralDeclaration, marker_id: &str) -> Option<&dyn MarkerNode> {
        self.find_trait(&decl.id, marker_id, &mut BTreeSet::new())
            .map(|value| value as &dyn MarkerNode)
    }

    fn members(&self, decl: &StructuralDeclaration) -> Result<Vec<Member>> {
        let mut resolved = BTreeMap::new();
        self.collect_members(&decl.id, &mut BTreeSet::new(), &mut resolved)?;

        Ok(resolved
            .into_iter()
            .map(|(name, kind)| Member::new(name, kind))
            .collect())
    }
}
