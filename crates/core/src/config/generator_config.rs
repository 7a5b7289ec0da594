use crate::errors::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MARKER_ID: &str = "demo.traits#dynamoCrud";
pub const DEFAULT_NAMESPACE: &str = "crud";
pub const DEFAULT_EXTENSION: &str = "ts";
pub const DEFAULT_DIAGNOSTIC_FILE: &str = "README.txt";

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Shape id of the persistence-entity marker
    #[serde(default = "default_marker_id")]
    pub marker_id: String,
    /// Root directory of every artifact, relative to the output
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// File written under `namespace` when nothing is marked
    #[serde(default = "default_diagnostic_file")]
    pub diagnostic_file: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_id: default_marker_id(),
            namespace: default_namespace(),
            extension: default_extension(),
            diagnostic_file: default_diagnostic_file(),
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a YAML config document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("marker_id", &self.marker_id),
            ("namespace", &self.namespace),
            ("extension", &self.extension),
            ("diagnostic_file", &self.diagnostic_file),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::configuration(format!(
                    "`{}` must not be empty",
                    field
                )));
            }
        }

        if !self.marker_id.contains('#') {
            return Err(CoreError::configuration(format!(
                "`marker_id` must be an absolute shape id, got `{}`",
                self.marker_id
            )));
        }

        if self.namespace.starts_with('/') || self.namespace.ends_with('/') {
            return Err(CoreError::configuration(format!(
                "`namespace` must be relative without a trailing slash, got `{}`",
                self.namespace
            )));
        }

        if self.extension.starts_with('.') {
            return Err(CoreError::configuration(
                "`extension` must not start with a dot",
            ));
        }

        Ok(())
    }

    /// Relative path of the diagnostic written when no structure is marked
    pub fn diagnostic_path(&self) -> String {
        format!("{}/{}", self.namespace, self.diagnostic_file)
    }

    /// Relative path of one artifact of `entity`
    pub fn artifact_path(&self, entity: &str, stem: &str) -> String {
        format!("{}/{}/{}.{}", self.namespace, entity, stem, self.extension)
    }
}

fn default_marker_id() -> String {
    DEFAULT_MARKER_ID.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_diagnostic_file() -> String {
    DEFAULT_DIAGNOSTIC_FILE.to_string()
}
