//! File-based config discovery
//!
//! Handles finding and loading `sol.toml` from a project root.

use std::path::{Path, PathBuf};

use crate::config::SolConfig;
use crate::error::{ConfigError, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "sol.toml";

/// File-based configuration discovery
///
/// Looks for `sol.toml` in the project root and loads it through
/// [`SolConfig::load`], so `SOL_` environment variables still apply.
///
/// # Example
///
/// ```no_run
/// use sol_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Project root this discovery searches.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the config file in the root directory
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<SolConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        SolConfig::load(Some(&path))
    }

    /// Load the config file if present, otherwise fall back to defaults
    /// (still layered with environment variables).
    pub fn load_or_default(&self) -> Result<SolConfig> {
        match self.find() {
            Some(path) => SolConfig::load(Some(&path)),
            None => {
                tracing::debug!(
                    "No {} in {}, using defaults",
                    CONFIG_FILE_NAME,
                    self.root.display()
                );
                SolConfig::load(None)
            }
        }
    }
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<SolConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
