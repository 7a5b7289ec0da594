use crudgen_core::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One emitted file, addressed relative to the output root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub relative_path: String,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Destination for generated artifacts. Writing an existing path replaces it.
pub trait ArtifactSink {
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<(), CoreError>;
}

pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` unless the file already holds exactly that. Returns whether it wrote.
    pub fn write_if_changed(&self, path: &Path, content: &str) -> Result<bool, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // compare bytes; whatever is at the path gets replaced, text or not
        if path.is_file() && fs::read(path)? == content.as_bytes() {
            return Ok(false);
        }

        fs::write(path, content)?;
        Ok(true)
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink writing artifacts below a base directory
pub struct FileManifest {
    base_dir: PathBuf,
    writer: CodeWriter,
}

impl FileManifest {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            writer: CodeWriter::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, relative_path: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(relative_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes || relative_path.is_empty() {
            return Err(CoreError::configuration(format!(
                "artifact path `{}` is not inside the output directory",
                relative_path
            )));
        }

        Ok(self.base_dir.join(relative))
    }
}

impl ArtifactSink for FileManifest {
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<(), CoreError> {
        let path = self.resolve(&artifact.relative_path)?;

        if self.writer.write_if_changed(&path, &artifact.content)? {
            tracing::debug!("Wrote {}", path.display());
        } else {
            tracing::debug!("Unchanged {}", path.display());
        }

        Ok(())
    }
}

/// Sink keeping artifacts in memory, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryManifest {
    files: BTreeMap<String, String>,
}

impl MemoryManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative_path: &str) -> Option<&str> {
        self.files.get(relative_path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
    }
}

impl ArtifactSink for MemoryManifest {
    fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<(), CoreError> {
        self.files
            .insert(artifact.relative_path.clone(), artifact.content.clone());
        Ok(())
    }
}
