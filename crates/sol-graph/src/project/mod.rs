//! The project model: lazy graph construction, root resolution, caching
//! and invalidation.
//!
//! ```text
//! get_root(A)
//!     │
//!     ├─ cached? ─────────────────────────────────────────▶ Arc<Root>
//!     │
//!     ▼  (one construction pass at a time)
//! collect  ── wave by wave, missing sources fetched/parsed/resolved
//!     │       concurrently and staged off to the side
//!     ▼
//! commit   ── under the graph write lock: generation unchanged?
//!     │       insert staged nodes, closure + AND, select, cache
//!     ▼
//! Arc<Root>
//! ```
//!
//! Invalidation (`source_did_change`, `update_definition`) takes the graph
//! write lock and bumps a generation counter, so a pass that raced with it
//! throws its work away and starts over instead of caching a stale answer.

mod build;
mod error;
mod plan;
mod root;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::definition::ProjectDefinition;
use crate::graph::{GraphStats, SourceGraph};
use crate::parser::{SolidityParser, SourceParser};
use crate::runtime::{ContentProvider, ImportResolver};
use crate::source_id::SourceId;
use crate::version::VersionDomain;

pub use error::ResolveError;
pub use plan::BuildPlan;
pub use root::Root;

/// Limits applied while building the graph.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Upper bound on a single content fetch.
    pub fetch_timeout: Option<Duration>,
    /// Upper bound on the number of sources one root may reach.
    pub max_sources: Option<usize>,
    /// Upper bound on the size of one source, in bytes.
    pub max_file_size: Option<usize>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: None,
            max_sources: Some(10_000),
            max_file_size: Some(10 * 1024 * 1024),
        }
    }
}

/// Resolution state for one project.
///
/// Owns its dependency graph and root cache; nothing is shared between
/// projects except the immutable version domain.
#[derive(Debug)]
pub struct Project {
    domain: Arc<VersionDomain>,
    definition: RwLock<Arc<ProjectDefinition>>,
    content: Arc<dyn ContentProvider>,
    resolver: Arc<dyn ImportResolver>,
    parser: Arc<dyn SourceParser>,
    options: ProjectOptions,
    graph: RwLock<SourceGraph>,
    roots: RwLock<FxHashMap<SourceId, Arc<Root>>>,
    build_lock: tokio::sync::Mutex<()>,
    generation: AtomicU64,
}

/// Builder for [`Project`].
#[derive(Debug)]
pub struct ProjectBuilder {
    definition: ProjectDefinition,
    content: Arc<dyn ContentProvider>,
    resolver: Arc<dyn ImportResolver>,
    parser: Option<Arc<dyn SourceParser>>,
    domain: Option<Arc<VersionDomain>>,
    options: ProjectOptions,
}

impl ProjectBuilder {
    /// Parser to use instead of [`SolidityParser`].
    pub fn parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Version domain to use instead of the solc release catalogue.
    pub fn domain(mut self, domain: Arc<VersionDomain>) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn options(mut self, options: ProjectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.options.fetch_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Project {
        Project {
            domain: self.domain.unwrap_or_else(VersionDomain::solc),
            definition: RwLock::new(Arc::new(self.definition)),
            content: self.content,
            resolver: self.resolver,
            parser: self
                .parser
                .unwrap_or_else(|| Arc::new(SolidityParser::new())),
            options: self.options,
            graph: RwLock::new(SourceGraph::new()),
            roots: RwLock::new(FxHashMap::default()),
            build_lock: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }
}

impl Project {
    pub fn builder(
        definition: ProjectDefinition,
        content: Arc<dyn ContentProvider>,
        resolver: Arc<dyn ImportResolver>,
    ) -> ProjectBuilder {
        ProjectBuilder {
            definition,
            content,
            resolver,
            parser: None,
            domain: None,
            options: ProjectOptions::default(),
        }
    }

    /// Project with the default parser, the solc catalogue and default limits.
    pub fn new(
        definition: ProjectDefinition,
        content: Arc<dyn ContentProvider>,
        resolver: Arc<dyn ImportResolver>,
    ) -> Self {
        Self::builder(definition, content, resolver).build()
    }

    pub fn domain(&self) -> &Arc<VersionDomain> {
        &self.domain
    }

    pub fn definition(&self) -> Arc<ProjectDefinition> {
        Arc::clone(&self.definition.read())
    }

    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    /// The cached root for `id`, without resolving anything.
    pub fn cached_root(&self, id: &SourceId) -> Option<Arc<Root>> {
        self.roots.read().get(id).cloned()
    }

    pub fn graph_stats(&self) -> GraphStats {
        self.graph.read().stats()
    }

    /// Sources currently in the graph that directly import `id`, sorted.
    pub fn dependents(&self, id: &SourceId) -> Vec<SourceId> {
        let mut dependents: Vec<SourceId> = self.graph.read().dependents_of(id).cloned().collect();
        dependents.sort();
        dependents
    }

    /// Forget `id` and every cached root whose result could depend on it.
    ///
    /// Other sources stay in the graph, so the next resolution re-reads
    /// only `id`.
    pub fn source_did_change(&self, id: &SourceId) {
        let mut graph = self.graph.write();
        let affected = graph.affected_by(id);
        let removed = graph.remove_source(id).is_some();
        self.generation.fetch_add(1, Ordering::AcqRel);

        let mut roots = self.roots.write();
        let before = roots.len();
        roots.retain(|root_id, root| !affected.contains(root_id) && !root.depends_on(id));
        debug!(
            source = %id,
            removed,
            evicted = before - roots.len(),
            "source changed"
        );
    }

    /// Replace the project definition.
    ///
    /// New remappings can change what any import resolves to, so they drop
    /// the whole graph. New allowable versions or overrides only change
    /// selection, so they drop cached roots and keep the graph. A change of
    /// the root set alone invalidates nothing.
    pub fn update_definition(&self, definition: ProjectDefinition) {
        let mut graph = self.graph.write();
        let change = {
            let mut current = self.definition.write();
            let change = current.diff(&definition);
            *current = Arc::new(definition);
            change
        };

        if change.remappings || change.versions {
            if change.remappings {
                graph.clear();
            }
            self.roots.write().clear();
            self.generation.fetch_add(1, Ordering::AcqRel);
        }

        debug!(
            remappings = change.remappings,
            versions = change.versions,
            roots = change.roots,
            "definition updated"
        );
    }

    /// Resolve every root of the definition, in order.
    pub async fn resolve_roots(&self) -> Result<Vec<Arc<Root>>, ResolveError> {
        let definition = self.definition();
        let mut resolved = Vec::with_capacity(definition.roots.len());
        for id in &definition.roots {
            resolved.push(self.get_root(id).await?);
        }
        Ok(resolved)
    }

    /// Group every root of the definition by the compiler version it
    /// builds with.
    pub async fn build_plan(&self) -> Result<BuildPlan, ResolveError> {
        let roots = self.resolve_roots().await?;
        Ok(BuildPlan::from_roots(roots.iter().map(|root| &**root)))
    }
}
