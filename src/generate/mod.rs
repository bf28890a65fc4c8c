//! Generation pass: extract, render and persist descriptors for every
//! step-marked declaration in an index.

pub mod extract;
pub mod render;

pub use extract::{ArgumentDescriptor, StepDescriptor};

use crate::index::ManifestIndex;
use crate::registry::{StepRegistry, REGISTRY_RESOURCE};
use crate::writer::{ArtifactWriter, WriteError};

/// Outcome of persisting one artifact.
#[derive(Debug)]
pub enum StepOutcome {
    Written {
        artifact: String,
    },
    /// The write failed; the pass carried on with the next declaration.
    WriteFailed {
        artifact: String,
        error: WriteError,
    },
}

impl StepOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, StepOutcome::Written { .. })
    }
}

/// Aggregated result of one generation pass.
///
/// The pass never fails on a per-declaration problem; failures are reported
/// here instead of propagating to the invoker.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Per-step outcomes, in processing order.
    pub outcomes: Vec<(String, StepOutcome)>,
    /// Outcome of the registry write; `None` when no steps were discovered
    /// and the registry artifact was skipped.
    pub registry: Option<StepOutcome>,
}

impl PassReport {
    /// Number of step descriptors successfully written.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_written()).count()
    }

    /// Number of step descriptors that failed to write.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

/// Settings for one generation pass.
#[derive(Debug, Clone)]
pub struct PassSettings {
    /// Logical namespace artifacts are written under
    pub namespace: String,
    /// Root sentinel type where field flattening stops
    pub root_type: String,
}

/// Run one generation pass over every step in the index.
///
/// Each step yields a `<stepName>.step` descriptor artifact and a registry
/// entry; the registry is written once at the end of the pass, skipped when
/// empty. Write failures are logged, recorded in the report and never abort
/// the pass.
pub fn run_pass(
    index: &ManifestIndex,
    settings: &PassSettings,
    writer: &mut dyn ArtifactWriter,
) -> PassReport {
    let mut registry = StepRegistry::new();
    let mut report = PassReport::default();

    for decl in index.steps() {
        let descriptor = extract::extract(index, decl, &settings.root_type);
        registry.insert(&descriptor.name, &descriptor.type_name);

        let artifact = render::descriptor_file_name(&descriptor.name);
        let text = render::render_descriptor(&descriptor);
        let outcome = match writer.write(&settings.namespace, &artifact, &text) {
            Ok(()) => {
                tracing::info!(step = %descriptor.name, artifact = %artifact, "Generated step descriptor");
                StepOutcome::Written { artifact }
            }
            Err(error) => {
                tracing::error!(step = %descriptor.name, %error, "Failed to write step descriptor");
                StepOutcome::WriteFailed { artifact, error }
            }
        };
        report.outcomes.push((descriptor.name, outcome));
    }

    if registry.is_empty() {
        tracing::debug!("No steps discovered, skipping registry artifact");
        return report;
    }

    let text = registry.to_properties();
    report.registry = Some(
        match writer.write(&settings.namespace, REGISTRY_RESOURCE, &text) {
            Ok(()) => {
                tracing::info!(entries = registry.len(), "Generated step registry");
                StepOutcome::Written {
                    artifact: REGISTRY_RESOURCE.to_string(),
                }
            }
            Err(error) => {
                tracing::error!(%error, "Failed to write step registry");
                StepOutcome::WriteFailed {
                    artifact: REGISTRY_RESOURCE.to_string(),
                    error,
                }
            }
        },
    );

    report
}
