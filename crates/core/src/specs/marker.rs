use crate::errors::{CoreError, Result};
use crate::model::MarkerNode;
use serde::{Deserialize, Serialize};

pub const TABLE_NAME_KEY: &str = "tableName";
pub const HASH_KEY_KEY: &str = "hashKey";
pub const DEFAULT_HASH_KEY: &str = "id";

/// Values carried by the persistence-entity marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMarker {
    pub table_name: String,
    pub hash_key: String,
}

impl EntityMarker {
    /// Read `tableName` (required) and `hashKey` (defaults to `id`).
    ///
    /// Other marker members are ignored. `shape` only labels errors.
    pub fn parse(shape: &str, node: &dyn MarkerNode) -> Result<Self> {
        let table_name = node
            .require_string(TABLE_NAME_KEY)
            .map_err(|e| in_shape(e, shape))?;
        let hash_key = node
            .string_or(HASH_KEY_KEY, DEFAULT_HASH_KEY)
            .map_err(|e| in_shape(e, shape))?;

        Ok(Self {
            table_name,
            hash_key,
        })
    }
}

fn in_shape(err: CoreError, shape: &str) -> CoreError {
    match err {
        CoreError::Configuration { message } => {
            CoreError::configuration(format!("{}: {}", shape, message))
        }
        other => other,
    }
}
