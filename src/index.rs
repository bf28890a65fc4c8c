//! Type metadata lookup backing the descriptor extractor.

use std::collections::BTreeMap;

use crate::manifest::{Manifest, TypeDecl};

/// Read-only type metadata query interface.
///
/// The extractor only ever asks for a declaration by qualified name; the
/// declaration itself answers the remaining queries (own fields, declared
/// superclass, marker lookup). Implementations may be backed by manifests,
/// a parsed AST, or anything else that can answer the lookup.
pub trait TypeIndex {
    /// Resolve a qualified type name to its declaration, if known.
    fn resolve(&self, qualified_name: &str) -> Option<&TypeDecl>;
}

/// In-memory index built from loaded manifests.
///
/// Keyed by qualified name; a later manifest declaring the same qualified
/// name replaces the earlier one. Iteration is in qualified-name order so a
/// generation pass is deterministic.
#[derive(Debug, Default)]
pub struct ManifestIndex {
    types: BTreeMap<String, TypeDecl>,
}

impl ManifestIndex {
    pub fn from_manifests(manifests: Vec<Manifest>) -> Self {
        let mut types = BTreeMap::new();
        for manifest in manifests {
            for decl in manifest.types {
                types.insert(decl.qualified_name.clone(), decl);
            }
        }
        Self { types }
    }

    /// All declarations carrying a step marker, in qualified-name order.
    pub fn steps(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values().filter(|decl| decl.step.is_some())
    }

    /// Number of known type declarations (steps and plain types alike).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIndex for ManifestIndex {
    fn resolve(&self, qualified_name: &str) -> Option<&TypeDecl> {
        self.types.get(qualified_name)
    }
}
