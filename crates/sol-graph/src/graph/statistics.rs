//! Statistics methods for SourceGraph.

use serde::Serialize;

use super::SourceGraph;

/// Snapshot of graph size, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub source_count: usize,
    pub edge_count: usize,
    /// Sources with no version pragma constraint at all.
    pub unconstrained_count: usize,
    /// Sources nothing in the graph imports.
    pub top_level_count: usize,
}

impl SourceGraph {
    pub fn stats(&self) -> GraphStats {
        let edge_count = self.nodes.values().map(|n| n.dependencies.len()).sum();
        let unconstrained_count = self.nodes.values().filter(|n| n.compatible.is_full()).count();
        let top_level_count = self
            .nodes
            .keys()
            .filter(|id| self.dependents.get(*id).is_none_or(|d| d.is_empty()))
            .count();

        GraphStats {
            source_count: self.nodes.len(),
            edge_count,
            unconstrained_count,
            top_level_count,
        }
    }
}
