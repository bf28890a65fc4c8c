//! Runtime invocation contract for step implementations.
//!
//! A host runtime resolves a step name through the generated registry and
//! invokes the implementing type through this trait. No parser from
//! descriptor text back to `StepMetadata` lives here; how a host binds the
//! two is its own concern.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime metadata describing a step implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    /// Published step name
    pub name: String,
    /// Qualified name of the implementing type
    pub implementation: String,
    /// Argument slots, in descriptor order
    #[serde(default)]
    pub arguments: Vec<ArgumentMetadata>,
}

/// One named argument slot of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
}

/// A step implementation a host runtime can invoke.
pub trait StepFunction {
    /// Invoke the step with the given named arguments.
    ///
    /// Argument validation is left to the implementer; the result is a
    /// single untyped value.
    fn invoke(&self, arguments: &BTreeMap<String, Value>) -> Result<Value>;

    /// Metadata describing this step.
    fn metadata(&self) -> &StepMetadata;
}
