//! Step name derivation, field flattening and argument discovery.

use crate::index::TypeIndex;
use crate::manifest::{non_empty, FieldDecl, TypeDecl};

/// Extracted form of one step declaration.
///
/// Transient: only the rendered descriptor text and the registry entry
/// survive a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Published step name
    pub name: String,
    /// Qualified name of the implementing type
    pub type_name: String,
    /// Kept arguments, in flattening order
    pub arguments: Vec<ArgumentDescriptor>,
}

/// One argument slot discovered on a step's field hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub type_name: Option<String>,
}

/// Bean-style decapitalization of a simple type identifier.
///
/// A leading pair of uppercase characters is left untouched, so `URLStep`
/// stays `URLStep` while `FooStep` becomes `fooStep`.
pub fn decapitalize(identifier: &str) -> String {
    let mut chars = identifier.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return String::new(),
    };
    if let Some(second) = chars.next() {
        if first.is_uppercase() && second.is_uppercase() {
            return identifier.to_string();
        }
    }
    let mut result = String::with_capacity(identifier.len());
    result.extend(first.to_lowercase());
    result.push_str(&identifier[first.len_utf8()..]);
    result
}

/// Derive the published name for a step declaration: the explicit marker
/// name when non-empty, the decapitalized simple identifier otherwise.
pub fn step_name(decl: &TypeDecl) -> String {
    decl.step
        .as_ref()
        .and_then(|marker| non_empty(marker.name.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| decapitalize(&decl.simple_name))
}

/// Flatten a declaration's field hierarchy.
///
/// Collects own-declared fields level by level following superclass links,
/// subtype fields first, each level's declaration order preserved.
/// Traversal stops at the root sentinel type and as soon as a superclass
/// cannot be resolved; a partial field list is fine.
pub fn flatten_fields<'a>(
    index: &'a dyn TypeIndex,
    decl: &'a TypeDecl,
    root_type: &str,
) -> Vec<&'a FieldDecl> {
    let mut fields: Vec<&FieldDecl> = Vec::new();
    let mut current = decl;
    loop {
        fields.extend(current.fields.iter());

        let superclass = match non_empty(current.superclass.as_deref()) {
            Some(name) => name,
            None => break,
        };
        if superclass == root_type {
            break;
        }
        match index.resolve(superclass) {
            Some(next) => current = next,
            None => break,
        }
    }
    fields
}

/// Extract the descriptor for one step-marked declaration.
///
/// Only fields carrying an argument marker are kept. The argument name is
/// mandatory (explicit marker name, else the field identifier; a field
/// whose resolved name is still empty is skipped); description and type
/// are kept only when they carry a non-empty value.
pub fn extract(index: &dyn TypeIndex, decl: &TypeDecl, root_type: &str) -> StepDescriptor {
    let name = step_name(decl);

    let mut arguments = Vec::new();
    for field in flatten_fields(index, decl, root_type) {
        let marker = match field.argument.as_ref() {
            Some(marker) => marker,
            None => continue,
        };
        let arg_name = non_empty(marker.name.as_deref()).unwrap_or(&field.name);
        if arg_name.is_empty() {
            continue;
        }
        arguments.push(ArgumentDescriptor {
            name: arg_name.to_string(),
            description: non_empty(marker.description.as_deref()).map(str::to_string),
            type_name: non_empty(field.type_name.as_deref()).map(str::to_string),
        });
    }

    StepDescriptor {
        name,
        type_name: decl.qualified_name.clone(),
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ManifestIndex;
    use crate::manifest::{ArgumentMarker, Manifest, StepMarker};

    const ROOT: &str = "java.lang.Object";

    fn field(name: &str, argument: Option<ArgumentMarker>) -> FieldDecl {
        FieldDecl {
            name: name.to_string(),
            type_name: Some("java.lang.String".to_string()),
            argument,
        }
    }

    fn arg_marker(name: Option<&str>, description: Option<&str>) -> ArgumentMarker {
        ArgumentMarker {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    fn decl(
        simple: &str,
        qualified: &str,
        superclass: Option<&str>,
        step_name: Option<&str>,
        fields: Vec<FieldDecl>,
    ) -> TypeDecl {
        TypeDecl {
            simple_name: simple.to_string(),
            qualified_name: qualified.to_string(),
            superclass: superclass.map(str::to_string),
            step: Some(StepMarker {
                name: step_name.map(str::to_string),
            }),
            fields,
        }
    }

    fn index_of(types: Vec<TypeDecl>) -> ManifestIndex {
        ManifestIndex::from_manifests(vec![Manifest { types }])
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("FooStep"), "fooStep");
        assert_eq!(decapitalize("HelloStep"), "helloStep");
        assert_eq!(decapitalize("x"), "x");
        assert_eq!(decapitalize("F"), "f");
        assert_eq!(decapitalize(""), "");
        // Leading uppercase pair is left untouched
        assert_eq!(decapitalize("URLStep"), "URLStep");
    }

    #[test]
    fn test_explicit_step_name_used_verbatim() {
        let decl = decl("GreetStep", "io.acme.GreetStep", None, Some("greet"), vec![]);
        assert_eq!(step_name(&decl), "greet");
    }

    #[test]
    fn test_missing_step_name_is_derived() {
        let decl = decl("HelloStep", "io.acme.HelloStep", None, None, vec![]);
        assert_eq!(step_name(&decl), "helloStep");
    }

    #[test]
    fn test_empty_step_name_is_derived() {
        let decl = decl("HelloStep", "io.acme.HelloStep", None, Some(""), vec![]);
        assert_eq!(step_name(&decl), "helloStep");
    }

    #[test]
    fn test_flattening_walks_three_level_chain() {
        let leaf = decl(
            "Leaf",
            "io.acme.Leaf",
            Some("io.acme.Mid"),
            None,
            vec![field("leaf_a", None), field("leaf_b", None)],
        );
        let mid = decl(
            "Mid",
            "io.acme.Mid",
            Some(ROOT),
            None,
            vec![field("mid_a", None)],
        );
        let index = index_of(vec![leaf.clone(), mid]);

        let names: Vec<_> = flatten_fields(&index, index.resolve("io.acme.Leaf").unwrap(), ROOT)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["leaf_a", "leaf_b", "mid_a"]);
    }

    #[test]
    fn test_flattening_stops_at_unresolvable_superclass() {
        let leaf = decl(
            "Leaf",
            "io.acme.Leaf",
            Some("io.acme.Missing"),
            None,
            vec![field("leaf_a", None)],
        );
        let index = index_of(vec![leaf]);

        let names: Vec<_> = flatten_fields(&index, index.resolve("io.acme.Leaf").unwrap(), ROOT)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["leaf_a"]);
    }

    #[test]
    fn test_flattening_excludes_root_sentinel_fields() {
        // A declaration for the sentinel itself must never be walked into,
        // even when it is present in the index with fields of its own.
        let root = decl(
            "Object",
            ROOT,
            None,
            None,
            vec![field("universal", None)],
        );
        let leaf = decl(
            "Leaf",
            "io.acme.Leaf",
            Some(ROOT),
            None,
            vec![field("leaf_a", None)],
        );
        let index = index_of(vec![root, leaf]);

        let names: Vec<_> = flatten_fields(&index, index.resolve("io.acme.Leaf").unwrap(), ROOT)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["leaf_a"]);
    }

    #[test]
    fn test_extract_keeps_only_marked_fields() {
        let decl = decl(
            "GreetStep",
            "io.acme.GreetStep",
            None,
            Some("greet"),
            vec![
                field("name", None),
                field("target", Some(arg_marker(Some("who"), Some("target to greet")))),
            ],
        );
        let index = index_of(vec![decl.clone()]);

        let descriptor = extract(&index, index.resolve("io.acme.GreetStep").unwrap(), ROOT);
        assert_eq!(descriptor.name, "greet");
        assert_eq!(descriptor.type_name, "io.acme.GreetStep");
        assert_eq!(descriptor.arguments.len(), 1);
        assert_eq!(descriptor.arguments[0].name, "who");
        assert_eq!(
            descriptor.arguments[0].description.as_deref(),
            Some("target to greet")
        );
        assert_eq!(
            descriptor.arguments[0].type_name.as_deref(),
            Some("java.lang.String")
        );
    }

    #[test]
    fn test_argument_name_falls_back_to_field_identifier() {
        let decl = decl(
            "GreetStep",
            "io.acme.GreetStep",
            None,
            None,
            vec![field("target", Some(arg_marker(None, None)))],
        );
        let index = index_of(vec![decl]);

        let descriptor = extract(&index, index.resolve("io.acme.GreetStep").unwrap(), ROOT);
        assert_eq!(descriptor.arguments[0].name, "target");
        assert!(descriptor.arguments[0].description.is_none());
    }

    #[test]
    fn test_argument_with_empty_resolved_name_is_skipped() {
        let mut empty_field = field("", Some(arg_marker(Some(""), None)));
        empty_field.type_name = None;
        let decl = decl("GreetStep", "io.acme.GreetStep", None, None, vec![empty_field]);
        let index = index_of(vec![decl]);

        let descriptor = extract(&index, index.resolve("io.acme.GreetStep").unwrap(), ROOT);
        assert!(descriptor.arguments.is_empty());
    }

    #[test]
    fn test_unresolved_field_type_is_omitted() {
        let mut untyped = field("target", Some(arg_marker(None, None)));
        untyped.type_name = None;
        let decl = decl("GreetStep", "io.acme.GreetStep", None, None, vec![untyped]);
        let index = index_of(vec![decl]);

        let descriptor = extract(&index, index.resolve("io.acme.GreetStep").unwrap(), ROOT);
        assert!(descriptor.arguments[0].type_name.is_none());
    }

    #[test]
    fn test_inherited_arguments_follow_own_arguments() {
        let leaf = decl(
            "Leaf",
            "io.acme.Leaf",
            Some("io.acme.Mid"),
            Some("leaf"),
            vec![field("own", Some(arg_marker(None, None)))],
        );
        let mid = decl(
            "Mid",
            "io.acme.Mid",
            Some(ROOT),
            None,
            vec![field("inherited", Some(arg_marker(None, None)))],
        );
        let index = index_of(vec![leaf, mid]);

        let descriptor = extract(&index, index.resolve("io.acme.Leaf").unwrap(), ROOT);
        let names: Vec<_> = descriptor.arguments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["own", "inherited"]);
    }
}
