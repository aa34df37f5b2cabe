//! Query methods for SourceGraph.

use super::{SourceGraph, SourceNode};
use crate::source_id::SourceId;

impl SourceGraph {
    pub fn get(&self, id: &SourceId) -> Option<&SourceNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &SourceId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceId> {
        self.nodes.keys()
    }

    /// Direct dependencies of `id`, empty if it is not a node.
    pub fn dependencies_of(&self, id: &SourceId) -> impl Iterator<Item = &SourceId> {
        self.nodes.get(id).into_iter().flat_map(|node| node.dependencies.iter())
    }

    /// Sources that directly import `id`.
    pub fn dependents_of(&self, id: &SourceId) -> impl Iterator<Item = &SourceId> {
        self.dependents.get(id).into_iter().flatten()
    }
}
