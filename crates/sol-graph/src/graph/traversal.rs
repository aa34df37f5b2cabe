//! Traversal methods for SourceGraph.
//!
//! Import graphs may contain cycles, so every walk keeps an explicit visited
//! set and an explicit stack; nothing here recurses.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet as HashSet;

use super::SourceGraph;
use crate::source_id::SourceId;
use crate::version::VersionSet;

/// Everything reachable from one source, with the combined constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    /// Every source reachable from the start, excluding the start itself.
    pub dependencies: BTreeSet<SourceId>,
    /// AND of the own sets of the start and every reachable node.
    pub compatible: VersionSet,
    /// Reachable sources that have no node in the graph. Empty for a
    /// completely built closure.
    pub missing: BTreeSet<SourceId>,
}

impl SourceGraph {
    /// Walk everything reachable from `root` and intersect their own sets.
    ///
    /// Returns `None` if `root` itself is not a node.
    pub fn transitive_closure(&self, root: &SourceId) -> Option<Closure> {
        let root_node = self.nodes.get(root)?;

        let mut compatible = root_node.compatible.clone();
        let mut dependencies = BTreeSet::new();
        let mut missing = BTreeSet::new();
        let mut visited = HashSet::default();
        visited.insert(root);
        let mut stack: Vec<&SourceId> = root_node.dependencies.iter().rev().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            dependencies.insert(current.clone());

            match self.nodes.get(current) {
                Some(node) => {
                    compatible &= &node.compatible;
                    stack.extend(node.dependencies.iter().rev().filter(|d| !visited.contains(*d)));
                }
                None => {
                    missing.insert(current.clone());
                }
            }
        }

        Some(Closure {
            dependencies,
            compatible,
            missing,
        })
    }

    /// `id` plus every source that reaches it through dependent edges.
    ///
    /// Works for sources that are no longer nodes, as long as their
    /// importers still are.
    pub fn affected_by(&self, id: &SourceId) -> HashSet<SourceId> {
        let mut affected = HashSet::default();
        let mut stack = vec![id.clone()];

        while let Some(current) = stack.pop() {
            if !affected.insert(current.clone()) {
                continue;
            }
            if let Some(importers) = self.dependents.get(&current) {
                stack.extend(importers.iter().filter(|i| !affected.contains(*i)).cloned());
            }
        }

        affected
    }
}
