//! Mutation methods for SourceGraph.

use super::{SourceGraph, SourceNode};
use crate::source_id::SourceId;

impl SourceGraph {
    /// Insert a fully processed node, recording a dependent edge for each of
    /// its dependencies. Replaces any previous node for `id`.
    pub fn insert_node(&mut self, id: SourceId, node: SourceNode) {
        self.remove_source(&id);

        for dep in &node.dependencies {
            self.dependents
                .entry(dep.clone())
                .or_default()
                .insert(id.clone());
        }
        self.nodes.insert(id, node);
    }

    /// Remove the node for `id` together with its outgoing edges.
    ///
    /// Edges pointing at `id` are kept: importers still import it, and the
    /// node is rebuilt the next time one of them is resolved.
    pub fn remove_source(&mut self, id: &SourceId) -> Option<SourceNode> {
        let node = self.nodes.remove(id)?;
        for dep in &node.dependencies {
            if let Some(importers) = self.dependents.get_mut(dep) {
                importers.remove(id);
                if importers.is_empty() {
                    self.dependents.remove(dep);
                }
            }
        }
        Some(node)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.dependents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionSet;
    use indexmap::IndexSet;

    fn node(deps: &[&str]) -> SourceNode {
        SourceNode::new(deps.iter().map(|d| SourceId::new(d)).collect::<IndexSet<_>>(), VersionSet::full(3))
    }

    #[test]
    fn insert_records_dependents() {
        let mut graph = SourceGraph::new();
        graph.insert_node("A.sol".into(), node(&["B.sol", "C.sol"]));
        graph.insert_node("B.sol".into(), node(&["C.sol"]));

        let mut importers: Vec<_> = graph.dependents_of(&"C.sol".into()).collect();
        importers.sort();
        assert_eq!(importers, vec![&SourceId::new("A.sol"), &SourceId::new("B.sol")]);
    }

    #[test]
    fn remove_drops_outgoing_edges_only() {
        let mut graph = SourceGraph::new();
        graph.insert_node("A.sol".into(), node(&["B.sol"]));
        graph.insert_node("B.sol".into(), node(&["C.sol"]));

        assert!(graph.remove_source(&"B.sol".into()).is_some());
        assert!(!graph.contains(&"B.sol".into()));
        assert_eq!(graph.dependents_of(&"C.sol".into()).count(), 0);
        assert_eq!(graph.dependents_of(&"B.sol".into()).count(), 1);
        assert!(graph.remove_source(&"B.sol".into()).is_none());
    }

    #[test]
    fn reinsert_replaces_edges() {
        let mut graph = SourceGraph::new();
        graph.insert_node("A.sol".into(), node(&["B.sol"]));
        graph.insert_node("A.sol".into(), node(&["C.sol"]));

        assert_eq!(graph.dependents_of(&"B.sol".into()).count(), 0);
        assert_eq!(graph.dependents_of(&"C.sol".into()).count(), 1);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut graph = SourceGraph::new();
        graph.insert_node("A.sol".into(), node(&["B.sol"]));
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.dependents_of(&"B.sol".into()).count(), 0);
    }
}
