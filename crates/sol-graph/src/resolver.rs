//! Source-name resolution for import directives.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::remapping::{Remapping, apply_remappings};
use crate::runtime::{RuntimeError, RuntimeResult};
use crate::source_id::SourceId;

fn is_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// Compute the source name `import` refers to when written in `context`.
///
/// Non-relative imports go through `remappings` first. A path that is
/// relative (before or after remapping) is joined to the directory of
/// `context`. The result is normalized and must stay inside the project.
pub fn resolve_source_name(
    context: &SourceId,
    import: &str,
    remappings: &[Remapping],
) -> RuntimeResult<SourceId> {
    if import.is_empty() {
        return Err(RuntimeError::resolution(import, context, "empty import path"));
    }
    if import.contains('\\') {
        return Err(RuntimeError::resolution(import, context, "backslashes are not allowed in import paths"));
    }

    let mapped = if is_relative(import) {
        import.to_string()
    } else {
        apply_remappings(context.as_str(), import, remappings)
    };

    if mapped.ends_with('/') {
        return Err(RuntimeError::resolution(import, context, "import does not name a file"));
    }
    if mapped.starts_with('/') {
        return Err(RuntimeError::resolution(import, context, "absolute import paths are not supported"));
    }

    let joined = if is_relative(&mapped) {
        Path::new(context.parent()).join(&mapped)
    } else {
        PathBuf::from(&mapped)
    };

    let cleaned = joined.clean();
    let mut parts = Vec::new();
    for component in cleaned.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => {
                return Err(RuntimeError::resolution(
                    import,
                    context,
                    format!("'{mapped}' escapes the project root"),
                ));
            }
        }
    }

    if parts.is_empty() {
        return Err(RuntimeError::resolution(import, context, "import does not name a file"));
    }
    Ok(SourceId::new(parts.join("/")))
}
