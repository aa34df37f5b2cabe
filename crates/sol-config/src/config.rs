//! High-level configuration structure for sol projects.
//!
//! This module provides the main `SolConfig` struct and its layered loading
//! (defaults, `sol.toml`, `SOL_` environment variables). For file discovery,
//! see the `discovery` module.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::solidity::{SolidityConfig, SolidityUserConfig};

/// Directory scanned for sources when `paths.sources` is not set.
pub const DEFAULT_SOURCES_DIR: &str = "contracts";

/// One directory or several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathList {
    pub fn to_vec(&self) -> Vec<PathBuf> {
        match self {
            Self::One(path) => vec![path.clone()],
            Self::Many(paths) => paths.clone(),
        }
    }
}

/// `paths.sources`: a [`PathList`], or a table keyed by language
/// (`{ solidity = ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePaths {
    One(PathBuf),
    Many(Vec<PathBuf>),
    Scoped {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        solidity: Option<PathList>,
    },
}

impl SourcePaths {
    /// Solidity source directories. A table without a `solidity` key
    /// falls back to [`DEFAULT_SOURCES_DIR`].
    pub fn to_vec(&self) -> Vec<PathBuf> {
        match self {
            Self::One(path) => vec![path.clone()],
            Self::Many(paths) => paths.clone(),
            Self::Scoped { solidity: Some(paths) } => paths.to_vec(),
            Self::Scoped { solidity: None } => vec![PathBuf::from(DEFAULT_SOURCES_DIR)],
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::One(PathBuf::from(DEFAULT_SOURCES_DIR))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub sources: SourcePaths,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solidity: Option<SolidityUserConfig>,

    /// Import remappings, `[context:]prefix=target`.
    #[serde(default)]
    pub remappings: Vec<String>,

    /// Source names compiled as standalone entry points.
    #[serde(default)]
    pub roots: Vec<String>,
}

impl SolConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use sol_config::SolConfig;
    /// use serde_json::json;
    ///
    /// let config = SolConfig::from_value(json!({
    ///     "solidity": "0.8.19",
    ///     "roots": ["contracts/Token.sol"]
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.roots, vec!["contracts/Token.sol".to_string()]);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    /// Parse a `sol.toml` document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("Invalid TOML syntax: {e}"),
        })
    }

    /// Load configuration from multiple sources.
    /// Priority: environment variables > config file > defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            tracing::debug!("Loading sol config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // SOL_SOLIDITY, SOL_ROOTS, ...
        figment = figment.merge(Env::prefixed("SOL_"));

        figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: format!("Check sol.toml syntax and field types: {e}"),
        })
    }

    /// Resolved solidity configuration (defaults applied).
    pub fn solidity(&self) -> SolidityConfig {
        self.solidity.clone().unwrap_or_default().resolve()
    }

    /// Source directories, resolved against the project root.
    pub fn source_dirs(&self, root: &Path) -> Vec<PathBuf> {
        self.paths
            .sources
            .to_vec()
            .into_iter()
            .map(|dir| if dir.is_absolute() { dir } else { root.join(dir) })
            .collect()
    }
}
