use std::collections::BTreeSet;

use semver::Version;
use tracing::debug;

use crate::graph::Closure;
use crate::source_id::SourceId;
use crate::version::{VersionDomain, VersionSet};

/// A resolved entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    id: SourceId,
    dependencies: BTreeSet<SourceId>,
    compatible: VersionSet,
    best_version: Option<Version>,
}

impl Root {
    /// Pick the newest version of `domain` that is compatible with the whole
    /// closure and allowed for this root.
    pub(crate) fn select(
        id: SourceId,
        closure: Closure,
        domain: &VersionDomain,
        allowable: &[Version],
    ) -> Self {
        let unknown: Vec<&Version> = allowable.iter().filter(|v| !domain.contains(v)).collect();
        if !unknown.is_empty() {
            debug!(root = %id, ?unknown, "ignoring allowable versions outside the version domain");
        }

        let candidates = closure.compatible.and(&domain.set_of(allowable));
        let best_version = candidates
            .highest_set_index()
            .and_then(|index| domain.get(index))
            .cloned();

        Self {
            id,
            dependencies: closure.dependencies,
            compatible: closure.compatible,
            best_version,
        }
    }

    pub fn id(&self) -> &SourceId {
        &self.id
    }

    /// Every source transitively imported by this root, excluding the root.
    pub fn dependencies(&self) -> &BTreeSet<SourceId> {
        &self.dependencies
    }

    /// Versions every file of the closure is compatible with, before the
    /// allowable list is applied.
    pub fn compatible(&self) -> &VersionSet {
        &self.compatible
    }

    /// Newest compiler version that satisfies every constraint, or `None`
    /// when the root is unsatisfiable.
    pub fn best_version(&self) -> Option<&Version> {
        self.best_version.as_ref()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.best_version.is_some()
    }

    pub fn depends_on(&self, id: &SourceId) -> bool {
        self.dependencies.contains(id)
    }
}
