//! Artifact sinks for generated resources.
//!
//! Artifacts are addressed by a dot-separated logical namespace and a
//! resource name; how a sink maps that address to storage is its own
//! concern.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to persist one artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory '{0}': {1}")]
    CreateDir(String, std::io::Error),

    #[error("failed to write artifact '{0}': {1}")]
    WriteFile(String, std::io::Error),
}

/// Sink for generated text resources.
pub trait ArtifactWriter {
    /// Write a named text resource under a logical namespace.
    fn write(&mut self, namespace: &str, name: &str, contents: &str) -> Result<(), WriteError>;
}

/// Writes artifacts under an output root, mapping namespace dots to path
/// separators (`io.acme` becomes `io/acme/`).
pub struct FsArtifactWriter {
    root: PathBuf,
}

impl FsArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resource_dir(&self, namespace: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for part in namespace.split('.').filter(|p| !p.is_empty()) {
            dir.push(part);
        }
        dir
    }
}

impl ArtifactWriter for FsArtifactWriter {
    fn write(&mut self, namespace: &str, name: &str, contents: &str) -> Result<(), WriteError> {
        let dir = self.resource_dir(namespace);
        fs::create_dir_all(&dir)
            .map_err(|err| WriteError::CreateDir(dir.display().to_string(), err))?;

        let path = dir.join(name);
        fs::write(&path, contents)
            .map_err(|err| WriteError::WriteFile(path.display().to_string(), err))?;

        tracing::debug!(artifact = %path.display(), "Wrote artifact");
        Ok(())
    }
}

/// In-memory writer recording every artifact, for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactWriter {
    artifacts: BTreeMap<(String, String), String>,
}

impl MemoryArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&str> {
        self.artifacts
            .get(&(namespace.to_string(), name.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactWriter for MemoryArtifactWriter {
    fn write(&mut self, namespace: &str, name: &str, contents: &str) -> Result<(), WriteError> {
        self.artifacts.insert(
            (namespace.to_string(), name.to_string()),
            contents.to_string(),
        );
        Ok(())
    }
}
