//! Structural parsing seam.
//!
//! The resolver never looks at source text itself. A [`SourceParser`] turns
//! text into a tree, and the tree answers two [`SyntaxQuery`] questions:
//! which import references it contains and which version pragmas it
//! declares. [`SolidityParser`] is the built-in implementation; embedders
//! with a full Solidity front end can plug in their own.

mod pragma;
mod solidity;

use std::fmt;

use crate::source_id::SourceId;
use crate::version::VersionExpr;

pub use pragma::parse_version_constraint;
pub use solidity::{SolidityParser, SolidityTree};

/// Byte range of a match inside its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// An import directive; `path` is the raw, unresolved import text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch {
    pub path: String,
    pub span: SourceSpan,
}

/// A `pragma solidity` directive, split into `||`-separated expression sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PragmaMatch {
    pub expression_sets: Vec<Vec<VersionExpr>>,
    pub span: SourceSpan,
}

/// Whole-file parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Queries over a parsed file.
///
/// Matches may be returned in any order; consumers sort by span.
pub trait SyntaxQuery: Send + Sync {
    fn import_matches(&self) -> Vec<ImportMatch>;

    /// Only version pragmas; other pragmas (`abicoder`, `experimental`)
    /// are not reported.
    fn pragma_matches(&self) -> Vec<PragmaMatch>;
}

/// Turns file text into a queryable tree.
pub trait SourceParser: Send + Sync + fmt::Debug {
    fn parse(&self, id: &SourceId, text: &str) -> Result<Box<dyn SyntaxQuery>, ParseError>;
}
