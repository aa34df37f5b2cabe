//! Collaborator abstraction for source access and import resolution.
//!
//! The project model never touches the filesystem. It reads source text
//! through a [`ContentProvider`] and maps import paths to source names
//! through an [`ImportResolver`], both injected as `Arc<dyn _>`. Embedders
//! (an editor with unsaved buffers, a remote cache) provide their own
//! implementations; [`FsContentProvider`] and [`SourceNameResolver`] cover
//! the on-disk case and [`MemorySources`] the in-memory one.

mod memory;
mod native;

pub use memory::MemorySources;
pub use native::{FsContentProvider, SourceNameResolver, discover_sources};

use async_trait::async_trait;

use crate::remapping::Remapping;
use crate::source_id::SourceId;

/// Result type for collaborator operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors reported by collaborators
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// No source with that name
    #[error("Source not found: {0}")]
    SourceNotFound(SourceId),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Import could not be mapped to a source name
    #[error("Failed to resolve import '{specifier}' from '{from}': {reason}")]
    ResolutionFailed {
        specifier: String,
        from: SourceId,
        reason: String,
    },

    /// Other collaborator error
    #[error("Runtime error: {0}")]
    Other(String),
}

impl RuntimeError {
    pub(crate) fn resolution(specifier: &str, from: &SourceId, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            specifier: specifier.to_string(),
            from: from.clone(),
            reason: reason.into(),
        }
    }
}

/// Supplies the text of a source.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use sol_graph::runtime::{ContentProvider, RuntimeResult};
///
/// #[derive(Debug)]
/// struct Buffers(RwLock<HashMap<SourceId, String>>);
///
/// #[async_trait]
/// impl ContentProvider for Buffers {
///     async fn read_source(&self, id: &SourceId) -> RuntimeResult<String> {
///         self.0
///             .read()
///             .get(id)
///             .cloned()
///             .ok_or_else(|| RuntimeError::SourceNotFound(id.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait ContentProvider: Send + Sync + std::fmt::Debug {
    async fn read_source(&self, id: &SourceId) -> RuntimeResult<String>;
}

/// Maps the raw text of an import to a canonical source name.
#[async_trait]
pub trait ImportResolver: Send + Sync + std::fmt::Debug {
    /// Resolve `import`, written in `context`, applying `remappings`.
    async fn resolve_import(
        &self,
        context: &SourceId,
        import: &str,
        remappings: &[Remapping],
    ) -> RuntimeResult<SourceId>;
}
