pub mod generate;
pub mod map;

use anyhow::Context;
use crudgen_core::{GeneratorConfig, SmithyModel};
use std::path::{Path, PathBuf};

/// Load the merged model and the generator config (defaults when no file is given)
pub fn load_inputs(
    models: &[PathBuf],
    config: Option<&Path>,
) -> anyhow::Result<(SmithyModel, GeneratorConfig)> {
    let config = match config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let model = SmithyModel::from_files(models).context("failed to load model")?;
    tracing::debug!("Model has {} shapes", model.shape_count());

    Ok((model, config))
}
