//! Filesystem-backed collaborators.
//!
//! Source names are paths relative to a project root directory, always
//! with `/` separators.
//!
//! ```text
//! ┌────────────────────┐
//! │ FsContentProvider  │
//! │  .read_source()    │────▶ std::fs::read_to_string(root/name)
//! ├────────────────────┤
//! │ SourceNameResolver │
//! │  .resolve_import() │────▶ remap + normalize ──▶ std::fs::metadata(root/name)
//! ├────────────────────┤
//! │ discover_sources() │────▶ walkdir over the source directories
//! └────────────────────┘
//! ```

// The only module that touches std::fs
#![allow(clippy::disallowed_methods)]

use std::collections::BTreeSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use path_clean::PathClean;
use tokio::task;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::{ContentProvider, ImportResolver, RuntimeError, RuntimeResult};
use crate::remapping::Remapping;
use crate::resolver::resolve_source_name;
use crate::source_id::SourceId;

fn join_error(e: task::JoinError) -> RuntimeError {
    RuntimeError::Other(format!("Task join error: {e}"))
}

/// Reads sources from a project directory.
///
/// Blocking `std::fs` calls run on tokio's blocking pool so they never
/// stall the executor.
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    root: PathBuf,
}

impl FsContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentProvider for FsContentProvider {
    async fn read_source(&self, id: &SourceId) -> RuntimeResult<String> {
        let path = self.root.join(id.as_str());
        let id = id.clone();

        task::spawn_blocking(move || {
            std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RuntimeError::SourceNotFound(id),
                _ => RuntimeError::Io(format!("Failed to read {}: {}", path.display(), e)),
            })
        })
        .await
        .map_err(join_error)?
    }
}

/// Resolves imports to source names, optionally checking that the target
/// exists under a project root.
#[derive(Debug, Clone, Default)]
pub struct SourceNameResolver {
    root: Option<PathBuf>,
}

impl SourceNameResolver {
    /// Purely lexical resolution; the target is not checked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolution that fails when the resolved file is missing under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

#[async_trait]
impl ImportResolver for SourceNameResolver {
    async fn resolve_import(
        &self,
        context: &SourceId,
        import: &str,
        remappings: &[Remapping],
    ) -> RuntimeResult<SourceId> {
        let resolved = resolve_source_name(context, import, remappings)?;
        let Some(root) = &self.root else {
            return Ok(resolved);
        };

        let path = root.join(resolved.as_str());
        let is_file = task::spawn_blocking(move || std::fs::metadata(&path).is_ok_and(|m| m.is_file()))
            .await
            .map_err(join_error)?;

        if is_file {
            Ok(resolved)
        } else {
            Err(RuntimeError::resolution(
                import,
                context,
                format!("'{resolved}' does not exist"),
            ))
        }
    }
}

/// Every `.sol` file under `dirs`, as source names relative to `root`.
///
/// Relative directories are taken from `root`. Hidden entries are skipped,
/// a missing directory contributes nothing, and files outside `root` are
/// left out. The result is sorted and free of duplicates.
pub async fn discover_sources(
    root: impl Into<PathBuf>,
    dirs: Vec<PathBuf>,
) -> RuntimeResult<Vec<SourceId>> {
    let root = root.into();
    task::spawn_blocking(move || walk_sources(&root, &dirs))
        .await
        .map_err(join_error)?
}

fn walk_sources(root: &Path, dirs: &[PathBuf]) -> RuntimeResult<Vec<SourceId>> {
    let root = root.clean();
    let mut found = BTreeSet::new();

    for dir in dirs {
        let dir = root.join(dir).clean();
        let entries = WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 && is_not_found(&e) => {
                    debug!(dir = %dir.display(), "source directory does not exist");
                    break;
                }
                Err(e) => {
                    return Err(RuntimeError::Io(format!(
                        "Failed to scan {}: {}",
                        dir.display(),
                        e
                    )));
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "sol") {
                continue;
            }
            match source_name(&root, path) {
                Some(id) => {
                    found.insert(id);
                }
                None => debug!(path = %path.display(), "skipping source outside the project root"),
            }
        }
    }

    debug!(root = %root.display(), count = found.len(), "discovered sources");
    Ok(found.into_iter().collect())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

/// `root/a/b.sol` as `a/b.sol`.
fn source_name(root: &Path, path: &Path) -> Option<SourceId> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    (!parts.is_empty()).then(|| SourceId::new(parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("contracts/lib")).unwrap();
        fs::write(dir.path().join("contracts/A.sol"), "pragma solidity ^0.8.0;").unwrap();
        fs::write(dir.path().join("contracts/lib/B.sol"), "").unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_sources_relative_to_root() {
        let dir = project();
        let provider = FsContentProvider::new(dir.path());
        let text = provider.read_source(&SourceId::new("contracts/A.sol")).await.unwrap();
        assert_eq!(text, "pragma solidity ^0.8.0;");
    }

    #[tokio::test]
    async fn missing_source_is_not_found() {
        let dir = project();
        let provider = FsContentProvider::new(dir.path());
        let err = provider.read_source(&SourceId::new("contracts/Nope.sol")).await.unwrap_err();
        assert!(matches!(err, RuntimeError::SourceNotFound(id) if id.as_str() == "contracts/Nope.sol"));
    }

    #[tokio::test]
    async fn rooted_resolver_checks_existence() {
        let dir = project();
        let resolver = SourceNameResolver::with_root(dir.path());
        let from = SourceId::new("contracts/A.sol");

        let found = resolver.resolve_import(&from, "./lib/B.sol", &[]).await.unwrap();
        assert_eq!(found.as_str(), "contracts/lib/B.sol");

        let missing = resolver.resolve_import(&from, "./missing.sol", &[]).await;
        assert!(matches!(missing, Err(RuntimeError::ResolutionFailed { .. })));

        let dir_import = resolver.resolve_import(&from, "./lib", &[]).await;
        assert!(dir_import.is_err());
    }

    #[tokio::test]
    async fn discovers_solidity_files_under_source_dirs() {
        let dir = project();
        fs::write(dir.path().join("contracts/README.md"), "").unwrap();
        fs::create_dir_all(dir.path().join("contracts/.cache")).unwrap();
        fs::write(dir.path().join("contracts/.cache/Stale.sol"), "").unwrap();

        let found = discover_sources(
            dir.path(),
            vec![
                PathBuf::from("./contracts"),
                PathBuf::from("contracts/lib"),
                PathBuf::from("missing"),
            ],
        )
        .await
        .unwrap();

        let names: Vec<&str> = found.iter().map(SourceId::as_str).collect();
        assert_eq!(names, vec!["contracts/A.sol", "contracts/lib/B.sol"]);
    }

    #[tokio::test]
    async fn sources_outside_the_root_are_skipped() {
        let dir = project();
        let outside = TempDir::new().expect("tempdir");
        fs::write(outside.path().join("Far.sol"), "").unwrap();

        let found = discover_sources(dir.path().join("contracts"), vec![outside.path().to_path_buf()])
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn lexical_resolver_does_not_touch_disk() {
        let resolver = SourceNameResolver::new();
        let from = SourceId::new("contracts/A.sol");
        let id = resolver.resolve_import(&from, "./missing.sol", &[]).await.unwrap();
        assert_eq!(id.as_str(), "contracts/missing.sol");
    }
}
