//! Declaration manifests describing host-language step classes.
//!
//! A manifest is a TOML sidecar record standing in for the host compiler's
//! reflection metadata: each document declares one or more types with their
//! own fields and superclass link. A type carries a `step` marker when it is
//! published as a step; a field carries an `argument` marker when it is an
//! input slot of the step.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One declaration manifest: zero or more type declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A reflectable host-language type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple identifier (e.g. `GreetStep`)
    pub simple_name: String,
    /// Fully qualified name (e.g. `io.acme.GreetStep`)
    pub qualified_name: String,
    /// Qualified name of the declared superclass, if any
    #[serde(default)]
    pub superclass: Option<String>,
    /// Present when the type is published as a step
    #[serde(default)]
    pub step: Option<StepMarker>,
    /// Own-declared fields, in declaration order (inherited fields are
    /// discovered by walking `superclass` links)
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// Step marker attached to a type declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepMarker {
    /// Explicit step name; absent or empty means "derive from the type name"
    #[serde(default)]
    pub name: Option<String>,
}

/// One field of a type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field identifier
    pub name: String,
    /// Declared type as a qualified name; absent when it did not resolve
    #[serde(default)]
    pub type_name: Option<String>,
    /// Present when the field is a step argument
    #[serde(default)]
    pub argument: Option<ArgumentMarker>,
}

/// Argument marker attached to a field declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgumentMarker {
    /// Explicit argument name; absent or empty falls back to the field name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Marker values treat the empty string the same as an absent value.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Manifest {
    /// Parse a single TOML manifest document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse manifest TOML")
    }

    /// Load one manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_toml(&text)
    }
}

/// Discover and load every `*.toml` manifest under `dir`, recursively.
///
/// A malformed or unreadable manifest is logged and skipped; it never stops
/// the batch. A missing directory yields an empty list.
pub fn load_manifest_dir(dir: &Path) -> Result<Vec<Manifest>> {
    let pattern = format!("{}/**/*.toml", dir.display());
    let mut manifests = Vec::new();

    for entry in glob::glob(&pattern).context("Invalid manifest glob pattern")? {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable manifest path");
                continue;
            }
        };
        match Manifest::load(&path) {
            Ok(manifest) => {
                tracing::debug!(manifest = %path.display(), types = manifest.types.len(), "Loaded manifest");
                manifests.push(manifest);
            }
            Err(err) => {
                tracing::warn!(manifest = %path.display(), error = %err, "Skipping malformed manifest");
            }
        }
    }

    Ok(manifests)
}
