//! Source dependency graph.
//!
//! Maps each resolved [`SourceId`] to a [`SourceNode`] holding its direct
//! dependencies and its own compatible-version set, and keeps the reverse
//! (dependent) edges needed for precise invalidation. The graph is plain
//! data; the project model owns it behind a lock.

mod mutations;
mod queries;
mod statistics;
mod traversal;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::source_id::SourceId;
use crate::version::VersionSet;

pub use statistics::GraphStats;
pub use traversal::Closure;

/// One fully processed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNode {
    /// Resolved direct imports, deduplicated, in declaration order.
    pub dependencies: IndexSet<SourceId>,
    /// Versions admitted by this file's own pragmas only.
    pub compatible: VersionSet,
}

impl SourceNode {
    pub fn new(dependencies: IndexSet<SourceId>, compatible: VersionSet) -> Self {
        Self {
            dependencies,
            compatible,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceGraph {
    nodes: HashMap<SourceId, SourceNode>,
    /// Reverse edges: source -> sources importing it. Entries may exist for
    /// sources that are not (or no longer) nodes.
    dependents: HashMap<SourceId, HashSet<SourceId>>,
}

impl SourceGraph {
    pub fn new() -> Self {
        Self::default()
    }
}
