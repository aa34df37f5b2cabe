//! Graph construction and root resolution.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures::future::try_join_all;
use indexmap::IndexSet;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use tracing::{debug, trace};

use super::{Project, ResolveError, Root};
use crate::definition::ProjectDefinition;
use crate::extract::SourceDeclarations;
use crate::graph::SourceNode;
use crate::source_id::SourceId;

/// Nodes built by one pass, not yet visible in the graph.
type Staged = HashMap<SourceId, SourceNode>;

impl Project {
    /// Resolve `id` as a root.
    ///
    /// Reads, parses and resolves every source the root reaches that is not
    /// already in the graph, then intersects the compatible sets of the
    /// whole closure and selects the newest allowable version. The result is
    /// cached until an invalidation affects it.
    ///
    /// Any failure aborts the call and leaves the graph and cache exactly as
    /// they were.
    pub async fn get_root(&self, id: &SourceId) -> Result<Arc<Root>, ResolveError> {
        if let Some(root) = self.cached_root(id) {
            trace!(root = %id, "root cache hit");
            return Ok(root);
        }

        let _pass = self.build_lock.lock().await;
        loop {
            // another caller may have resolved it while we waited
            if let Some(root) = self.cached_root(id) {
                return Ok(root);
            }

            let generation = self.generation.load(Ordering::Acquire);
            let definition = self.definition();
            let staged = self.collect_sources(id, &definition).await?;
            let staged_count = staged.len();

            match self.commit(id, generation, staged, &definition) {
                Some(root) => {
                    debug!(
                        root = %id,
                        new_sources = staged_count,
                        dependencies = root.dependencies().len(),
                        best_version = ?root.best_version(),
                        "resolved root"
                    );
                    return Ok(root);
                }
                None => debug!(root = %id, "invalidated during resolution, retrying"),
            }
        }
    }

    /// Build every node reachable from `root` that the graph lacks.
    ///
    /// Works in breadth-first waves. Nodes already in the graph are not
    /// re-read, but their dependencies are followed so that sources
    /// dropped by invalidation further down are found again.
    async fn collect_sources(
        &self,
        root: &SourceId,
        definition: &ProjectDefinition,
    ) -> Result<Staged, ResolveError> {
        let mut staged = Staged::default();
        let mut seen: HashSet<SourceId> = HashSet::default();
        seen.insert(root.clone());
        let mut wave = vec![root.clone()];

        while !wave.is_empty() {
            let mut next = Vec::new();
            let mut missing = Vec::new();
            {
                let graph = self.graph.read();
                for id in wave {
                    match graph.get(&id) {
                        Some(node) => next.extend(
                            node.dependencies
                                .iter()
                                .filter(|dep| seen.insert((*dep).clone()))
                                .cloned(),
                        ),
                        None => missing.push(id),
                    }
                }
            }

            if !missing.is_empty() {
                trace!(count = missing.len(), "processing sources");
                let built =
                    try_join_all(missing.into_iter().map(|id| self.build_node(id, definition)))
                        .await?;
                for (id, node) in built {
                    next.extend(
                        node.dependencies
                            .iter()
                            .filter(|dep| seen.insert((*dep).clone()))
                            .cloned(),
                    );
                    staged.insert(id, node);
                }
            }

            if let Some(max) = self.options.max_sources {
                if seen.len() > max {
                    return Err(ResolveError::TooManySources {
                        count: seen.len(),
                        max,
                    });
                }
            }
            wave = next;
        }

        Ok(staged)
    }

    /// Fetch, parse and extract one source and resolve its imports.
    async fn build_node(
        &self,
        id: SourceId,
        definition: &ProjectDefinition,
    ) -> Result<(SourceId, SourceNode), ResolveError> {
        let text = self.fetch(&id).await?;
        if let Some(max) = self.options.max_file_size {
            if text.len() > max {
                return Err(ResolveError::FileTooLarge {
                    id,
                    size: text.len(),
                    max,
                });
            }
        }

        let declarations = {
            let tree = self
                .parser
                .parse(&id, &text)
                .map_err(|source| ResolveError::Parse {
                    id: id.clone(),
                    source,
                })?;
            SourceDeclarations::extract(tree.as_ref())
        };
        let compatible = declarations.compatible_set(&self.domain);

        let mut dependencies = IndexSet::with_capacity(declarations.imports.len());
        for import in &declarations.imports {
            let dep = self
                .resolver
                .resolve_import(&id, import, &definition.remappings)
                .await
                .map_err(|source| ResolveError::UnresolvableImport {
                    from: id.clone(),
                    import: import.clone(),
                    source,
                })?;
            dependencies.insert(dep);
        }

        trace!(
            source = %id,
            imports = dependencies.len(),
            compatible = compatible.count(),
            "built source node"
        );
        Ok((id, SourceNode::new(dependencies, compatible)))
    }

    async fn fetch(&self, id: &SourceId) -> Result<String, ResolveError> {
        let read = self.content.read_source(id);
        let result = match self.options.fetch_timeout {
            Some(after) => tokio::time::timeout(after, read)
                .await
                .map_err(|_| ResolveError::Timeout {
                    id: id.clone(),
                    after,
                })?,
            None => read.await,
        };
        result.map_err(|source| ResolveError::UnreadableSource {
            id: id.clone(),
            source,
        })
    }

    /// Publish a pass and resolve the root against the updated graph.
    ///
    /// Returns `None` if an invalidation happened since `generation` was
    /// read; the staged nodes are then discarded.
    fn commit(
        &self,
        id: &SourceId,
        generation: u64,
        staged: Staged,
        definition: &ProjectDefinition,
    ) -> Option<Arc<Root>> {
        let mut graph = self.graph.write();
        if self.generation.load(Ordering::Acquire) != generation {
            return None;
        }

        for (source, node) in staged {
            graph.insert_node(source, node);
        }

        let closure = graph.transitive_closure(id)?;
        debug_assert!(closure.missing.is_empty(), "closure of {id} is incomplete");

        let root = Arc::new(Root::select(
            id.clone(),
            closure,
            &self.domain,
            definition.allowable_for(id),
        ));
        self.roots.write().insert(id.clone(), Arc::clone(&root));
        Some(root)
    }
}
