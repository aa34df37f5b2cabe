use std::time::Duration;

use crate::parser::ParseError;
use crate::runtime::RuntimeError;
use crate::source_id::SourceId;

/// Fatal errors of a single [`Project::get_root`](super::Project::get_root)
/// call. None of them leaves anything behind in the graph or the root cache.
///
/// An unsatisfiable root is not an error; see [`Root::best_version`](super::Root::best_version).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot read source '{id}'")]
    UnreadableSource {
        id: SourceId,
        #[source]
        source: RuntimeError,
    },

    #[error("cannot resolve import '{import}' in '{from}'")]
    UnresolvableImport {
        from: SourceId,
        import: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to parse '{id}'")]
    Parse {
        id: SourceId,
        #[source]
        source: ParseError,
    },

    #[error("reading '{id}' timed out after {after:?}")]
    Timeout { id: SourceId, after: Duration },

    #[error("import graph exceeds {max} sources (reached {count})")]
    TooManySources { count: usize, max: usize },

    #[error("source '{id}' is {size} bytes, limit is {max}")]
    FileTooLarge { id: SourceId, size: usize, max: usize },
}

impl ResolveError {
    /// The source the failure is attributed to, if any.
    pub fn source_id(&self) -> Option<&SourceId> {
        match self {
            Self::UnreadableSource { id, .. }
            | Self::Parse { id, .. }
            | Self::Timeout { id, .. }
            | Self::FileTooLarge { id, .. } => Some(id),
            Self::UnresolvableImport { from, .. } => Some(from),
            Self::TooManySources { .. } => None,
        }
    }
}
