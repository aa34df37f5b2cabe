//! Crate-level tests for the project model.
//!
//! Unit tests for individual pieces live next to them; these exercise
//! `Project` end to end over in-memory sources.

mod invalidation_tests;

use std::sync::Arc;

use crate::{
    MemorySources, Project, ProjectDefinition, ProjectOptions, SourceId, Version, VersionDomain,
};

pub(crate) const VERSIONS: [&str; 5] = ["0.7.6", "0.8.0", "0.8.19", "0.8.22", "0.9.0"];

pub(crate) fn v(text: &str) -> Version {
    Version::parse(text).expect("valid version")
}

pub(crate) fn id(name: &str) -> SourceId {
    SourceId::new(name)
}

pub(crate) fn test_domain() -> Arc<VersionDomain> {
    Arc::new(VersionDomain::parse(VERSIONS).expect("valid versions"))
}

/// Every test version allowed.
pub(crate) fn full_definition() -> ProjectDefinition {
    ProjectDefinition::new(VERSIONS.map(v))
}

pub(crate) struct Fixture {
    pub sources: Arc<MemorySources>,
    pub project: Arc<Project>,
}

impl Fixture {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self::with(files, full_definition(), ProjectOptions::default())
    }

    pub fn with(
        files: &[(&str, &str)],
        definition: ProjectDefinition,
        options: ProjectOptions,
    ) -> Self {
        Self::from_sources(MemorySources::new(), files, definition, options)
    }

    pub fn from_sources(
        sources: MemorySources,
        files: &[(&str, &str)],
        definition: ProjectDefinition,
        options: ProjectOptions,
    ) -> Self {
        for (name, text) in files {
            sources.set_source(*name, *text);
        }
        let sources = Arc::new(sources);
        let project = Project::builder(definition, sources.clone(), sources.clone())
            .domain(test_domain())
            .options(options)
            .build();
        Self {
            sources,
            project: Arc::new(project),
        }
    }

    pub fn reads(&self, name: &str) -> usize {
        self.sources.read_count(name)
    }
}

pub(crate) fn best(root: &crate::Root) -> Option<String> {
    root.best_version().map(ToString::to_string)
}

pub(crate) fn deps(root: &crate::Root) -> Vec<&str> {
    root.dependencies().iter().map(SourceId::as_str).collect()
}
