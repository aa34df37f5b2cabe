//! Pluggable config validation strategies
//!
//! Separates filesystem validation from schema validation so the graph
//! engine can be driven from virtual sources.

use std::path::{Path, PathBuf};

use crate::config::SolConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &SolConfig) -> Result<()>;
}

/// The parts of a `[context:]prefix=target` remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemappingParts<'a> {
    pub context: Option<&'a str>,
    pub prefix: &'a str,
    pub target: &'a str,
}

/// Why a string is not a remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemappingSyntax {
    #[error("missing '='")]
    MissingEquals,

    #[error("empty prefix")]
    EmptyPrefix,
}

/// Split a remapping into its parts. The only remapping grammar; the
/// graph's `Remapping` parses through this too.
pub fn split_remapping(
    remapping: &str,
) -> std::result::Result<RemappingParts<'_>, RemappingSyntax> {
    let (lhs, target) = remapping
        .split_once('=')
        .ok_or(RemappingSyntax::MissingEquals)?;
    let (context, prefix) = match lhs.split_once(':') {
        Some((context, prefix)) => (Some(context), prefix),
        None => (None, lhs),
    };
    if prefix.is_empty() {
        return Err(RemappingSyntax::EmptyPrefix);
    }
    Ok(RemappingParts { context, prefix, target })
}

/// Check a remapping has the `[context:]prefix=target` shape.
pub fn validate_remapping(remapping: &str) -> Result<()> {
    split_remapping(remapping)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidRemapping {
            remapping: remapping.to_string(),
            reason: e.to_string(),
        })
}

/// Check a compiler version is a complete `MAJOR.MINOR.PATCH` version.
pub fn validate_version(version: &str) -> Result<()> {
    semver::Version::parse(version)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidVersion {
            version: version.to_string(),
            reason: e.to_string(),
        })
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use sol_config::{ConfigValidator, SchemaValidator, SolConfig};
///
/// let config = SolConfig::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &SolConfig) -> Result<()> {
        if config.paths.sources.to_vec().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "paths.sources cannot be empty".to_string(),
                hint: Some("Remove the key to use the default 'contracts' directory".to_string()),
            });
        }

        let solidity = config.solidity();
        for (name, profile) in &solidity.profiles {
            if profile.compilers.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("profile '{name}' has no compilers"),
                    hint: Some("Add at least one compiler version".to_string()),
                });
            }
            for version in profile
                .versions()
                .chain(profile.overrides.values().map(|o| o.version.as_str()))
            {
                validate_version(version)?;
            }
        }

        for remapping in &config.remappings {
            validate_remapping(remapping)?;
        }

        for root in config.roots.iter().chain(&solidity.dependencies_to_compile) {
            if root.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "root source names cannot be empty".to_string(),
                    hint: Some("Remove empty strings from 'roots'".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator
///
/// Validates that source directories and explicit roots exist on disk.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &SolConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        for dir in config.source_dirs(&self.root) {
            if !dir.is_dir() {
                return Err(ConfigError::SourceDirNotFound { path: dir });
            }
        }

        for root in &config.roots {
            let path = self.root.join(root);
            if !path.is_file() {
                return Err(ConfigError::RootNotFound { path });
            }
        }

        Ok(())
    }
}

/// Validate with [`SchemaValidator`].
pub fn validate_schema(config: &SolConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Validate with [`FsValidator`] rooted at `root`.
pub fn validate_fs(config: &SolConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remapping_shapes() {
        assert!(validate_remapping("@oz/=lib/oz/").is_ok());
        assert!(validate_remapping("lib/a:@oz/=lib/oz-v4/").is_ok());
        assert!(validate_remapping("@oz/=").is_ok());
        assert!(validate_remapping("@oz/").is_err());
        assert!(validate_remapping("=lib/oz/").is_err());
        assert!(validate_remapping("ctx:=lib/oz/").is_err());
    }

    #[test]
    fn remapping_parts() {
        assert_eq!(
            split_remapping("lib/a:@oz/=lib/oz-v4/"),
            Ok(RemappingParts {
                context: Some("lib/a"),
                prefix: "@oz/",
                target: "lib/oz-v4/",
            })
        );
        assert_eq!(split_remapping("@oz/").unwrap_err(), RemappingSyntax::MissingEquals);
        assert_eq!(split_remapping(":=x").unwrap_err(), RemappingSyntax::EmptyPrefix);
    }

    #[test]
    fn versions_must_be_complete() {
        assert!(validate_version("0.8.19").is_ok());
        assert!(validate_version("0.8").is_err());
        assert!(validate_version("latest").is_err());
    }
}
