//! In-memory sources.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{ContentProvider, ImportResolver, RuntimeError, RuntimeResult};
use crate::remapping::Remapping;
use crate::resolver::resolve_source_name;
use crate::source_id::SourceId;

/// A mutable set of named sources acting as both content provider and
/// import resolver.
///
/// Every read is counted per source, which makes it easy to check how often
/// the project model went back to a file. An optional latency is applied
/// to each read.
#[derive(Debug, Default)]
pub struct MemorySources {
    sources: RwLock<FxHashMap<SourceId, String>>,
    reads: RwLock<FxHashMap<SourceId, usize>>,
    latency: Option<Duration>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a source.
    pub fn set_source(&self, name: impl Into<SourceId>, text: impl Into<String>) {
        self.sources.write().insert(name.into(), text.into());
    }

    pub fn remove_source(&self, name: &str) -> Option<String> {
        self.sources.write().remove(name)
    }

    /// How many times `name` has been read.
    pub fn read_count(&self, name: &str) -> usize {
        self.reads.read().get(name).copied().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.read().values().sum()
    }

    pub fn reset_read_counts(&self) {
        self.reads.write().clear();
    }
}

#[async_trait]
impl ContentProvider for MemorySources {
    async fn read_source(&self, id: &SourceId) -> RuntimeResult<String> {
        *self.reads.write().entry(id.clone()).or_default() += 1;
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.sources
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::SourceNotFound(id.clone()))
    }
}

#[async_trait]
impl ImportResolver for MemorySources {
    async fn resolve_import(
        &self,
        context: &SourceId,
        import: &str,
        remappings: &[Remapping],
    ) -> RuntimeResult<SourceId> {
        let resolved = resolve_source_name(context, import, remappings)?;
        if self.sources.read().contains_key(&resolved) {
            Ok(resolved)
        } else {
            Err(RuntimeError::resolution(
                import,
                context,
                format!("'{resolved}' does not exist"),
            ))
        }
    }
}
