use crate::templates::{
    render_template, string_literal, CREATE_TEMPLATE, DELETE_TEMPLATE, HANDLER_PREAMBLE,
    INDEX_TEMPLATE, READ_TEMPLATE, TYPES_TEMPLATE, UPDATE_TEMPLATE,
};
use crate::writer::GeneratedArtifact;
use crudgen_core::{CoreError, EntityDescriptor, GeneratorConfig};
use std::collections::HashMap;

/// Artifact stems, in emission order
pub const ARTIFACT_STEMS: [&str; 6] = ["types", "create", "read", "update", "delete", "index"];

pub struct EntityGenerator<'a> {
    config: &'a GeneratorConfig,
    entity: &'a EntityDescriptor,
}

impl<'a> EntityGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig, entity: &'a EntityDescriptor) -> Self {
        Self { config, entity }
    }

    /// All six artifacts for the entity
    pub fn generate_all(&self) -> Result<Vec<GeneratedArtifact>, CoreError> {
        Ok(vec![
            self.generate_types()?,
            self.generate_create()?,
            self.generate_read()?,
            self.generate_update()?,
            self.generate_delete()?,
            self.generate_index()?,
        ])
    }

    pub fn generate_types(&self) -> Result<GeneratedArtifact, CoreError> {
        let mut context = HashMap::new();
        context.insert("name", self.entity.name.clone());
        context.insert("fields", self.format_type_fields());

        let content = render_template(TYPES_TEMPLATE, &context)?;
        Ok(self.artifact("types", content))
    }

    pub fn generate_create(&self) -> Result<GeneratedArtifact, CoreError> {
        self.generate_handler("create", CREATE_TEMPLATE)
    }

    pub fn generate_read(&self) -> Result<GeneratedArtifact, CoreError> {
        self.generate_handler("read", READ_TEMPLATE)
    }

    pub fn generate_update(&self) -> Result<GeneratedArtifact, CoreError> {
        self.generate_handler("update", UPDATE_TEMPLATE)
    }

    pub fn generate_delete(&self) -> Result<GeneratedArtifact, CoreError> {
        self.generate_handler("delete", DELETE_TEMPLATE)
    }

    pub fn generate_index(&self) -> Result<GeneratedArtifact, CoreError> {
        let mut context = HashMap::new();
        context.insert("name", self.entity.name.clone());

        let content = render_template(INDEX_TEMPLATE, &context)?;
        Ok(self.artifact("index", content))
    }

    fn generate_handler(&self, stem: &str, template: &str) -> Result<GeneratedArtifact, CoreError> {
        let body = render_template(template, &self.handler_context()?)?;
        Ok(self.artifact(stem, format!("{}{}", HANDLER_PREAMBLE, body)))
    }

    fn handler_context(&self) -> Result<HashMap<&'static str, String>, CoreError> {
        let mut context = HashMap::new();
        context.insert("name", self.entity.name.clone());
        context.insert("table", string_literal(&self.entity.table_name)?);
        context.insert("hash_key", string_literal(&self.entity.hash_key)?);
        context.insert(
            "not_found",
            string_literal(&format!("{} not found", self.entity.alias))?,
        );
        Ok(context)
    }

    fn format_type_fields(&self) -> String {
        self.entity
            .fields
            .iter()
            .map(|field| format!("  {}: {};", field.name, field.mapped_type))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn artifact(&self, stem: &str, content: String) -> GeneratedArtifact {
        GeneratedArtifact::new(self.config.artifact_path(&self.entity.name, stem), content)
    }
}
