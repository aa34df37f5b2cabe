//! Reduces a parsed file to what the resolver needs from it.

use crate::parser::SyntaxQuery;
use crate::version::{VersionDomain, VersionPragma, VersionSet, compatible_set};

/// Raw import paths and version pragmas of one file, in declaration order.
///
/// Nothing here is resolved yet: imports are the text as written and
/// pragmas are unevaluated expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDeclarations {
    pub imports: Vec<String>,
    pub pragmas: Vec<VersionPragma>,
}

impl SourceDeclarations {
    pub fn extract(tree: &dyn SyntaxQuery) -> Self {
        let mut imports = tree.import_matches();
        imports.sort_by_key(|m| m.span.start);

        let mut pragmas = tree.pragma_matches();
        pragmas.sort_by_key(|m| m.span.start);

        Self {
            imports: imports.into_iter().map(|m| m.path).collect(),
            pragmas: pragmas
                .into_iter()
                .map(|m| VersionPragma::new(m.expression_sets))
                .collect(),
        }
    }

    /// The file's own compatible set: every pragma ANDed together.
    pub fn compatible_set(&self, domain: &VersionDomain) -> VersionSet {
        compatible_set(domain, &self.pragmas)
    }
}
