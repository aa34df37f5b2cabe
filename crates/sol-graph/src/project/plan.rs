use std::collections::BTreeMap;

use semver::Version;

use super::Root;
use crate::source_id::SourceId;

/// Resolved roots grouped by the compiler version they build with.
///
/// Each key is one compiler invocation; roots with no satisfying version
/// are listed separately so the caller can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
    pub jobs: BTreeMap<Version, Vec<SourceId>>,
    pub unsatisfiable: Vec<SourceId>,
}

impl BuildPlan {
    pub fn from_roots<'a>(roots: impl IntoIterator<Item = &'a Root>) -> Self {
        let mut plan = Self::default();
        for root in roots {
            match root.best_version() {
                Some(version) => plan
                    .jobs
                    .entry(version.clone())
                    .or_default()
                    .push(root.id().clone()),
                None => plan.unsatisfiable.push(root.id().clone()),
            }
        }
        plan
    }

    /// Compiler versions needed, oldest first.
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.jobs.keys()
    }

    pub fn is_complete(&self) -> bool {
        self.unsatisfiable.is_empty()
    }
}
