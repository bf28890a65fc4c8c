//! Block-structured descriptor text rendering.
//!
//! The skeleton and its literal tokens are fixed; the host runtime parses
//! this format, so order and spacing matter.

use super::extract::StepDescriptor;

/// One `key 'value'` line at the given indent depth (two spaces per level).
fn entry(depth: usize, key: &str, value: &str) -> String {
    format!("{}{} '{}'\n", "  ".repeat(depth), key, value)
}

/// File name of the descriptor artifact for a step.
pub fn descriptor_file_name(step_name: &str) -> String {
    format!("{}.step", step_name)
}

/// Render the full descriptor block for one step.
pub fn render_descriptor(descriptor: &StepDescriptor) -> String {
    let mut out = String::new();
    out.push_str("step {\n");
    out.push_str("  metadata {\n");
    out.push_str(&entry(2, "name", &descriptor.name));
    out.push_str("  }\n");
    out.push_str("  args {\n");
    for arg in &descriptor.arguments {
        out.push_str("    arg {\n");
        out.push_str(&entry(3, "name", &arg.name));
        if let Some(description) = &arg.description {
            out.push_str(&entry(3, "description", description));
        }
        if let Some(type_name) = &arg.type_name {
            out.push_str(&entry(3, "className", type_name));
        }
        out.push_str("    }\n");
    }
    out.push_str("  }\n");
    out.push_str("  steps {\n");
    out.push_str(&format!(
        "    javaStepFunction  '{} ${{args}}'\n",
        descriptor.name
    ));
    out.push_str("  }\n");
    out.push_str("}\n");
    out
}
