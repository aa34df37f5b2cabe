//! Project definition: the external input a resolution cycle runs against.

use std::path::Path;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use semver::Version;
use sol_config::{ConfigError, SolConfig};

use crate::remapping::{Remapping, RemappingError};
use crate::runtime::{RuntimeError, discover_sources};
use crate::source_id::SourceId;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid compiler version '{version}'")]
    Version {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error(transparent)]
    Remapping(#[from] RemappingError),

    #[error("failed to discover sources")]
    Discovery(#[source] RuntimeError),
}

/// Roots of interest, remapping table and the compiler versions the project
/// may build with.
///
/// `allowable_versions` says what the project permits, which is distinct
/// from what a file is compatible with. `overrides` pins individual roots
/// to one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDefinition {
    pub roots: IndexSet<SourceId>,
    pub remappings: Vec<Remapping>,
    pub allowable_versions: Vec<Version>,
    pub overrides: FxHashMap<SourceId, Version>,
}

/// Which parts of a definition differ from another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefinitionChange {
    pub roots: bool,
    pub remappings: bool,
    /// Allowable versions or overrides.
    pub versions: bool,
}

impl DefinitionChange {
    pub fn is_empty(&self) -> bool {
        !(self.roots || self.remappings || self.versions)
    }
}

impl ProjectDefinition {
    pub fn new(allowable_versions: impl IntoIterator<Item = Version>) -> Self {
        Self {
            allowable_versions: allowable_versions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceId>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn with_remappings(mut self, remappings: impl IntoIterator<Item = Remapping>) -> Self {
        self.remappings.extend(remappings);
        self
    }

    pub fn with_override(mut self, source: impl Into<SourceId>, version: Version) -> Self {
        self.overrides.insert(source.into(), version);
        self
    }

    /// Build a definition from a loaded configuration and profile name.
    ///
    /// Roots are the configured `roots` followed by
    /// `dependencies_to_compile`.
    pub fn from_config(config: &SolConfig, profile: &str) -> Result<Self, DefinitionError> {
        let solidity = config.solidity();
        let build = solidity.profile(profile)?;

        let allowable_versions = build
            .versions()
            .map(parse_version)
            .collect::<Result<Vec<_>, _>>()?;

        let overrides = build
            .overrides
            .iter()
            .map(|(source, compiler)| Ok((SourceId::new(source), parse_version(&compiler.version)?)))
            .collect::<Result<FxHashMap<_, _>, DefinitionError>>()?;

        let remappings = config
            .remappings
            .iter()
            .map(|r| r.parse::<Remapping>())
            .collect::<Result<Vec<_>, _>>()?;

        let roots = config
            .roots
            .iter()
            .chain(&solidity.dependencies_to_compile)
            .map(SourceId::new)
            .collect();

        Ok(Self {
            roots,
            remappings,
            allowable_versions,
            overrides,
        })
    }

    /// Like [`from_config`](Self::from_config), with every `.sol` file under
    /// the configured source directories of `project_root` as a root too.
    ///
    /// Discovered sources come first, in name order, followed by the
    /// explicit `roots` and `dependencies_to_compile`.
    pub async fn discover(
        config: &SolConfig,
        profile: &str,
        project_root: &Path,
    ) -> Result<Self, DefinitionError> {
        let mut definition = Self::from_config(config, profile)?;
        let discovered = discover_sources(project_root, config.source_dirs(project_root))
            .await
            .map_err(DefinitionError::Discovery)?;

        let explicit = std::mem::take(&mut definition.roots);
        definition.roots = discovered.into_iter().chain(explicit).collect();
        Ok(definition)
    }

    /// Versions `root` may be built with.
    pub fn allowable_for(&self, root: &SourceId) -> &[Version] {
        match self.overrides.get(root) {
            Some(version) => std::slice::from_ref(version),
            None => &self.allowable_versions,
        }
    }

    pub fn diff(&self, other: &Self) -> DefinitionChange {
        DefinitionChange {
            roots: self.roots != other.roots,
            remappings: self.remappings != other.remappings,
            versions: self.allowable_versions != other.allowable_versions
                || self.overrides != other.overrides,
        }
    }
}

fn parse_version(version: &str) -> Result<Version, DefinitionError> {
    Version::parse(version).map_err(|source| DefinitionError::Version {
        version: version.to_string(),
        source,
    })
}
