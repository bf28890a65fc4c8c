//! Step registry: the flat name-to-implementing-type index for one pass.

use std::collections::BTreeMap;

use chrono::Utc;

/// Resource name of the registry artifact.
pub const REGISTRY_RESOURCE: &str = "steps.properties";

/// Registry of step name to implementing qualified type name.
///
/// Inserting an existing name silently overwrites it: the last declaration
/// processed wins. Entries serialize in name order.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    entries: BTreeMap<String, String>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, step_name: &str, type_name: &str) {
        self.entries
            .insert(step_name.to_string(), type_name.to_string());
    }

    pub fn get(&self, step_name: &str) -> Option<&str> {
        self.entries.get(step_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a properties-style text block with a generated header.
    pub fn to_properties(&self) -> String {
        let mut out = String::new();
        out.push_str("# Generated by stepgen\n");
        out.push_str(&format!("# {}\n", Utc::now().format("%Y-%m-%dT%H:%M:%SZ")));
        for (name, type_name) in &self.entries {
            out.push_str(&format!("{}={}\n", escape_key(name), type_name));
        }
        out
    }
}

/// Escape the characters a properties key cannot contain bare.
fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            ' ' | '=' | ':' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
