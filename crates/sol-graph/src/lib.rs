//! # sol-graph
//!
//! Solidity source graph and compiler version resolution.
//!
//! Given a root contract file, this crate discovers every file it
//! transitively imports, intersects their `pragma solidity` constraints and
//! picks the newest compiler version the project allows, or reports that no
//! version satisfies them all.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Project                              │
//! │  get_root · update_definition · source_did_change           │
//! └────────────────────┬────────────────────────────────────────┘
//!                      │
//!          ┌───────────┼───────────────┬───────────────┐
//!          │           │               │               │
//!          ▼           ▼               ▼               ▼
//!   ┌────────────┐ ┌──────────┐ ┌─────────────┐ ┌──────────────┐
//!   │ Content    │ │ Import   │ │ Source      │ │ SourceGraph  │
//!   │ Provider   │ │ Resolver │ │ Parser      │ │ (nodes +     │
//!   │ (runtime)  │ │(runtime) │ │ (parser)    │ │  dependents) │
//!   └────────────┘ └──────────┘ └──────┬──────┘ └──────────────┘
//!                                      │
//!                                      ▼
//!                          ┌──────────────────────┐
//!                          │ SourceDeclarations   │
//!                          │  imports + pragmas   │
//!                          └──────────┬───────────┘
//!                                     │
//!                                     ▼
//!                          ┌──────────────────────┐
//!                          │ VersionDomain /      │
//!                          │ VersionSet (bits)    │
//!                          └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sol_graph::{MemorySources, Project, ProjectDefinition, SourceId, Version, VersionDomain};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sources = Arc::new(MemorySources::new());
//! sources.set_source("contracts/Token.sol", "pragma solidity ^0.8.0;\nimport \"./Math.sol\";");
//! sources.set_source("contracts/Math.sol", "pragma solidity >=0.7.0 <0.8.20;");
//!
//! let definition = ProjectDefinition::new([Version::new(0, 8, 19), Version::new(0, 8, 24)])
//!     .with_roots(["contracts/Token.sol"]);
//! let project = Project::builder(definition, sources.clone(), sources)
//!     .domain(VersionDomain::solc())
//!     .build();
//!
//! let root = futures::executor::block_on(project.get_root(&SourceId::new("contracts/Token.sol")))?;
//! assert_eq!(root.best_version(), Some(&Version::new(0, 8, 19)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! `Project` is `Send + Sync`. Cached roots are read concurrently; graph
//! construction passes are serialized per project, and no lock is held
//! across an `.await`.

pub mod definition;
pub mod extract;
pub mod graph;
pub mod parser;
pub mod project;
pub mod remapping;
pub mod resolver;
pub mod runtime;
pub mod source_id;
pub mod version;

#[cfg(test)]
mod tests;

pub use definition::{DefinitionChange, DefinitionError, ProjectDefinition};
pub use extract::SourceDeclarations;
pub use graph::{Closure, GraphStats, SourceGraph, SourceNode};
pub use parser::{
    ImportMatch, ParseError, PragmaMatch, SolidityParser, SolidityTree, SourceParser, SourceSpan,
    SyntaxQuery,
};
pub use project::{BuildPlan, Project, ProjectBuilder, ProjectOptions, ResolveError, Root};
pub use remapping::{Remapping, RemappingError, apply_remappings};
pub use resolver::resolve_source_name;
pub use runtime::{
    ContentProvider, FsContentProvider, ImportResolver, MemorySources, RuntimeError,
    RuntimeResult, SourceNameResolver, discover_sources,
};
pub use source_id::SourceId;
pub use version::{Version, VersionDomain, VersionExpr, VersionLiteral, VersionPragma, VersionSet};
