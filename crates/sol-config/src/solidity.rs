//! Solidity compiler configuration.
//!
//! The `solidity` key accepts several shapes, from a bare version string up
//! to named build profiles. [`SolidityUserConfig`] models what the user wrote;
//! [`SolidityConfig`] is the resolved form where every shape has been
//! normalized into profiles.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Compiler version used when the config does not mention one.
pub const DEFAULT_SOLC_VERSION: &str = "0.8.0";

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "default";

/// A single compiler entry as written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolcUserConfig {
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// Several compilers plus per-source overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiVersionSolcUserConfig {
    pub compilers: Vec<SolcUserConfig>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, SolcUserConfig>,
}

/// The body of one named build profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileUserConfig {
    Single(SolcUserConfig),
    Multi(MultiVersionSolcUserConfig),
}

/// Every accepted shape of the `solidity` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum SolidityUserConfig {
    /// `solidity = "0.8.19"`
    Version(String),

    /// `solidity = ["0.8.19", "0.7.6"]`
    Versions(Vec<String>),

    /// `[solidity] version = "0.8.19"`
    Single {
        compiler: SolcUserConfig,
        dependencies_to_compile: Vec<String>,
    },

    /// `[solidity] compilers = [...]`
    Multi {
        config: MultiVersionSolcUserConfig,
        dependencies_to_compile: Vec<String>,
    },

    /// `[solidity.profiles.<name>]`
    Profiles {
        profiles: IndexMap<String, ProfileUserConfig>,
        dependencies_to_compile: Vec<String>,
    },
}

const SHAPE_HINT: &str = "Expected a version string, an array of version strings, or an object \
configuring one or more versions of Solidity or multiple build profiles";

fn reject_field(object: &Map<String, Value>, field: &str, conflicts_with: &str) -> std::result::Result<(), String> {
    if object.contains_key(field) {
        return Err(format!(
            "`{field}`: This field is incompatible with `{conflicts_with}`"
        ));
    }
    Ok(())
}

fn take_dependencies(object: &mut Map<String, Value>) -> std::result::Result<Vec<String>, String> {
    match object.remove("dependencies_to_compile") {
        None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| format!("`dependencies_to_compile`: {e}")),
    }
}

impl TryFrom<Value> for SolidityUserConfig {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::String(version) => Ok(Self::Version(version)),
            Value::Array(items) => {
                if items.is_empty() {
                    return Err("Expected a non-empty array of version strings".to_string());
                }
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s),
                        other => Err(format!("Expected a version string, found {other}")),
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(Self::Versions)
            }
            Value::Object(mut object) => {
                if object.contains_key("version") {
                    reject_field(&object, "compilers", "version")?;
                    reject_field(&object, "profiles", "version")?;
                    let dependencies_to_compile = take_dependencies(&mut object)?;
                    let compiler = serde_json::from_value(Value::Object(object))
                        .map_err(|e| e.to_string())?;
                    Ok(Self::Single {
                        compiler,
                        dependencies_to_compile,
                    })
                } else if object.contains_key("compilers") {
                    reject_field(&object, "profiles", "compilers")?;
                    let dependencies_to_compile = take_dependencies(&mut object)?;
                    let config: MultiVersionSolcUserConfig =
                        serde_json::from_value(Value::Object(object))
                            .map_err(|e| e.to_string())?;
                    if config.compilers.is_empty() {
                        return Err("`compilers`: Expected at least one compiler".to_string());
                    }
                    Ok(Self::Multi {
                        config,
                        dependencies_to_compile,
                    })
                } else if object.contains_key("profiles") {
                    let dependencies_to_compile = take_dependencies(&mut object)?;
                    let profiles = object
                        .remove("profiles")
                        .map(serde_json::from_value)
                        .transpose()
                        .map_err(|e| format!("`profiles`: {e}"))?
                        .unwrap_or_default();
                    if let Some(field) = object.keys().next() {
                        return Err(format!("`{field}`: unexpected field"));
                    }
                    Ok(Self::Profiles {
                        profiles,
                        dependencies_to_compile,
                    })
                } else {
                    Err(SHAPE_HINT.to_string())
                }
            }
            _ => Err(SHAPE_HINT.to_string()),
        }
    }
}

impl From<SolidityUserConfig> for Value {
    fn from(config: SolidityUserConfig) -> Self {
        fn with_dependencies(mut value: Value, dependencies: Vec<String>) -> Value {
            if let (Value::Object(object), false) = (&mut value, dependencies.is_empty()) {
                object.insert("dependencies_to_compile".to_string(), Value::from(dependencies));
            }
            value
        }

        match config {
            SolidityUserConfig::Version(version) => Value::String(version),
            SolidityUserConfig::Versions(versions) => Value::from(versions),
            SolidityUserConfig::Single {
                compiler,
                dependencies_to_compile,
            } => with_dependencies(
                serde_json::to_value(compiler).unwrap_or(Value::Null),
                dependencies_to_compile,
            ),
            SolidityUserConfig::Multi {
                config,
                dependencies_to_compile,
            } => with_dependencies(
                serde_json::to_value(config).unwrap_or(Value::Null),
                dependencies_to_compile,
            ),
            SolidityUserConfig::Profiles {
                profiles,
                dependencies_to_compile,
            } => {
                let mut object = Map::new();
                object.insert(
                    "profiles".to_string(),
                    serde_json::to_value(profiles).unwrap_or(Value::Null),
                );
                with_dependencies(Value::Object(object), dependencies_to_compile)
            }
        }
    }
}

impl Default for SolidityUserConfig {
    fn default() -> Self {
        Self::Version(DEFAULT_SOLC_VERSION.to_string())
    }
}

/// A resolved compiler entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolcConfig {
    pub version: String,

    #[serde(default)]
    pub settings: Value,
}

impl From<&SolcUserConfig> for SolcConfig {
    fn from(config: &SolcUserConfig) -> Self {
        Self {
            version: config.version.clone(),
            settings: config
                .settings
                .clone()
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

impl SolcConfig {
    fn with_version(version: &str) -> Self {
        Self {
            version: version.to_string(),
            settings: Value::Object(Map::new()),
        }
    }
}

/// A resolved build profile: the compilers a project may use, and pinned
/// compilers for individual sources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildProfile {
    pub compilers: Vec<SolcConfig>,

    #[serde(default)]
    pub overrides: IndexMap<String, SolcConfig>,
}

impl BuildProfile {
    fn single(compiler: SolcConfig) -> Self {
        Self {
            compilers: vec![compiler],
            overrides: IndexMap::new(),
        }
    }

    /// Compiler versions of this profile, in configured order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.compilers.iter().map(|c| c.version.as_str())
    }
}

impl From<&ProfileUserConfig> for BuildProfile {
    fn from(profile: &ProfileUserConfig) -> Self {
        match profile {
            ProfileUserConfig::Single(compiler) => Self::single(compiler.into()),
            ProfileUserConfig::Multi(config) => Self {
                compilers: config.compilers.iter().map(SolcConfig::from).collect(),
                overrides: config
                    .overrides
                    .iter()
                    .map(|(source, compiler)| (source.clone(), compiler.into()))
                    .collect(),
            },
        }
    }
}

/// Solidity configuration with every shape normalized into profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidityConfig {
    pub profiles: IndexMap<String, BuildProfile>,

    #[serde(default)]
    pub dependencies_to_compile: Vec<String>,
}

impl SolidityConfig {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&BuildProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Every compiler version mentioned by any profile, compilers and
    /// overrides alike, deduplicated in first-seen order.
    pub fn versions_to_use(&self) -> IndexSet<&str> {
        self.profiles
            .values()
            .flat_map(|profile| {
                profile
                    .versions()
                    .chain(profile.overrides.values().map(|o| o.version.as_str()))
            })
            .collect()
    }
}

impl SolidityUserConfig {
    /// Normalize into [`SolidityConfig`].
    ///
    /// A `profiles` config without a `default` entry gets one pinned to
    /// [`DEFAULT_SOLC_VERSION`].
    pub fn resolve(&self) -> SolidityConfig {
        let mut profiles = IndexMap::new();

        let dependencies_to_compile = match self {
            Self::Version(version) => {
                profiles.insert(
                    DEFAULT_PROFILE.to_string(),
                    BuildProfile::single(SolcConfig::with_version(version)),
                );
                Vec::new()
            }
            Self::Versions(versions) => {
                profiles.insert(
                    DEFAULT_PROFILE.to_string(),
                    BuildProfile {
                        compilers: versions.iter().map(|v| SolcConfig::with_version(v)).collect(),
                        overrides: IndexMap::new(),
                    },
                );
                Vec::new()
            }
            Self::Single {
                compiler,
                dependencies_to_compile,
            } => {
                profiles.insert(
                    DEFAULT_PROFILE.to_string(),
                    BuildProfile::single(compiler.into()),
                );
                dependencies_to_compile.clone()
            }
            Self::Multi {
                config,
                dependencies_to_compile,
            } => {
                profiles.insert(
                    DEFAULT_PROFILE.to_string(),
                    BuildProfile::from(&ProfileUserConfig::Multi(config.clone())),
                );
                dependencies_to_compile.clone()
            }
            Self::Profiles {
                profiles: user_profiles,
                dependencies_to_compile,
            } => {
                for (name, profile) in user_profiles {
                    profiles.insert(name.clone(), BuildProfile::from(profile));
                }
                if !profiles.contains_key(DEFAULT_PROFILE) {
                    profiles.insert(
                        DEFAULT_PROFILE.to_string(),
                        BuildProfile::single(SolcConfig::with_version(DEFAULT_SOLC_VERSION)),
                    );
                }
                dependencies_to_compile.clone()
            }
        };

        SolidityConfig {
            profiles,
            dependencies_to_compile,
        }
    }
}
