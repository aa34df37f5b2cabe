//! Canonical source identities.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Canonical, resolved name of one source file.
///
/// This is the graph key: the post-remapping source name (for example
/// `contracts/Token.sol` or `@openzeppelin/contracts/token/ERC20/ERC20.sol`),
/// never the raw text of an import directive. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(Arc<str>);

impl SourceId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the source name, without a trailing slash.
    ///
    /// `contracts/token/ERC20.sol` -> `contracts/token`; a top-level name
    /// yields the empty string.
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SourceId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}
