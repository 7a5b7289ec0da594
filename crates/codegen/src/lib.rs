pub mod generator;
pub mod templates;
pub mod writer;

pub use generator::*;
pub use writer::*;

use crudgen_core::{CoreError, EntityDescriptor, GeneratorConfig, ModelAccessor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use templates::{render_template, DIAGNOSTIC_TEMPLATE};

/// What a generation run emitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Entity names, in processing order
    pub entities: Vec<String>,
    /// Relative paths, in emission order
    pub artifacts: Vec<String>,
}

impl GenerationReport {
    /// True when the run only wrote the "nothing marked" diagnostic
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

pub struct CodeGenerator {
    pub config: GeneratorConfig,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate every marked structure of `model` into `sink`.
    ///
    /// Entities are emitted one at a time. A malformed marker stops the run;
    /// artifacts of entities handled before it stay in the sink.
    pub fn generate<M, S>(&self, model: &M, sink: &mut S) -> Result<GenerationReport, CoreError>
    where
        M: ModelAccessor + ?Sized,
        S: ArtifactSink + ?Sized,
    {
        let mut report = GenerationReport::default();
        let declarations = model.list_annotated_structures(&self.config.marker_id);

        if declarations.is_empty() {
            tracing::warn!(
                "No structures annotated with @{} were found",
                self.config.marker_id
            );
            let diagnostic = self.generate_diagnostic()?;
            sink.write_artifact(&diagnostic)?;
            report.artifacts.push(diagnostic.relative_path);
            return Ok(report);
        }

        for decl in &declarations {
            let entity = EntityDescriptor::from_model(model, decl, &self.config.marker_id)?;

            if report.entities.contains(&entity.name) {
                tracing::warn!(
                    "Entity name {} is used by more than one structure; {} overwrites earlier output",
                    entity.name,
                    decl.id
                );
            }

            for artifact in self.generate_entity(&entity)? {
                sink.write_artifact(&artifact)?;
                report.artifacts.push(artifact.relative_path);
            }

            tracing::info!(
                "Generated CRUD handlers for {} (table {}, key {})",
                entity.name,
                entity.table_name,
                entity.hash_key
            );
            report.entities.push(entity.name);
        }

        tracing::info!(
            "Code generation completed: {} entities, {} files",
            report.entities.len(),
            report.artifacts.len()
        );
        Ok(report)
    }

    /// The six artifacts of a single entity, without writing them
    pub fn generate_entity(&self, entity: &EntityDescriptor) -> Result<Vec<GeneratedArtifact>, CoreError> {
        EntityGenerator::new(&self.config, entity).generate_all()
    }

    pub fn generate_diagnostic(&self) -> Result<GeneratedArtifact, CoreError> {
        let mut context = HashMap::new();
        context.insert("marker_id", self.config.marker_id.clone());

        let content = render_template(DIAGNOSTIC_TEMPLATE, &context)?;
        Ok(GeneratedArtifact::new(self.config.diagnostic_path(), content))
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
