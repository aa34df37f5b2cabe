//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors
    #[error("source directory not found: {}", .path.display())]
    SourceDirNotFound { path: PathBuf },

    #[error("root source not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("unknown build profile '{0}'")]
    UnknownProfile(String),

    // Schema validation errors (no filesystem checks)
    #[error("invalid compiler version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("invalid remapping '{remapping}': {reason}")]
    InvalidRemapping { remapping: String, reason: String },

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
