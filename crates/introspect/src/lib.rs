//! Handler map: which symbol each generated file exports and the HTTP route
//! a deployment should bind it to.

use crudgen_core::{CoreError, EntityDescriptor, GeneratorConfig, ModelAccessor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerMap {
    pub entities: Vec<EntityInfo>,
    pub routes: Vec<HandlerRoute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub name: String,
    pub shape_id: String,
    pub table: String,
    pub hash_key: String,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRoute {
    pub entity: String,
    pub operation: String,
    pub symbol: String,
    pub method: String,
    pub path: String,
    pub file: String,
}

impl HandlerMap {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Routes belonging to one entity
    pub fn routes_for<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a HandlerRoute> + 'a {
        self.routes.iter().filter(move |route| route.entity == entity)
    }
}

pub struct MapGenerator {
    config: GeneratorConfig,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate<M>(&self, model: &M) -> Result<HandlerMap, CoreError>
    where
        M: ModelAccessor + ?Sized,
    {
        let mut map = HandlerMap::default();

        for decl in model.list_annotated_structures(&self.config.marker_id) {
            let entity = EntityDescriptor::from_model(model, &decl, &self.config.marker_id)?;
            map.routes.extend(self.entity_routes(&entity));
            map.entities.push(EntityInfo {
                directory: format!("{}/{}", self.config.namespace, entity.name),
                name: entity.name,
                shape_id: decl.id,
                table: entity.table_name,
                hash_key: entity.hash_key,
            });
        }

        Ok(map)
    }

    fn entity_routes(&self, entity: &EntityDescriptor) -> Vec<HandlerRoute> {
        let collection = format!("/{}s", entity.name.to_lowercase());
        let item = format!("{}/{{id}}", collection);

        [
            ("create", entity.create_symbol(), "POST", &collection, "create"),
            ("list", entity.list_symbol(), "GET", &collection, "read"),
            ("get", entity.get_symbol(), "GET", &item, "read"),
            ("update", entity.update_symbol(), "PUT", &item, "update"),
            ("delete", entity.delete_symbol(), "DELETE", &item, "delete"),
        ]
        .into_iter()
        .map(|(operation, symbol, method, path, stem)| HandlerRoute {
            entity: entity.name.clone(),
            operation: operation.to_string(),
            symbol,
            method: method.to_string(),
            path: path.clone(),
            file: self.config.artifact_path(&entity.name, stem),
        })
        .collect()
    }
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
