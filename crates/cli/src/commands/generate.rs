use super::load_inputs;
use anyhow::Context;
use crudgen_codegen::{CodeGenerator, FileManifest, GenerationReport};
use std::path::{Path, PathBuf};

pub fn run(models: &[PathBuf], output: &Path, config: Option<&Path>) -> anyhow::Result<GenerationReport> {
    let (model, config) = load_inputs(models, config)?;

    let generator = CodeGenerator::new(config);
    let mut manifest = FileManifest::new(output);
    let report = generator
        .generate(&model, &mut manifest)
        .context("code generation failed")?;

    if report.is_empty() {
        println!(
            "No structures annotated with @{} were found (see {})",
            generator.config.marker_id,
            output.join(generator.config.diagnostic_path()).display()
        );
    } else {
        for entity in &report.entities {
            println!("✓ {}", entity);
        }
        println!(
            "✓ Code generation completed: {} files in {}",
            report.artifacts.len(),
            output.display()
        );
    }

    Ok(report)
}
