//! Tests for configuration validation.

use sol_config::{ConfigError, ConfigValidator, FsValidator, SchemaValidator, SolConfig};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn schema_rejects_bad_compiler_version() {
    let config = SolConfig::from_value(json!({ "solidity": ["0.8.19", "0.8"] })).unwrap();
    match SchemaValidator.validate(&config).unwrap_err() {
        ConfigError::InvalidVersion { version, .. } => assert_eq!(version, "0.8"),
        other => panic!("expected InvalidVersion, got {other:?}"),
    }
}

#[test]
fn schema_rejects_bad_override_version() {
    let config = SolConfig::from_value(json!({
        "solidity": {
            "compilers": [{ "version": "0.8.19" }],
            "overrides": { "contracts/Old.sol": { "version": "0.4" } }
        }
    }))
    .unwrap();
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::InvalidVersion { .. })
    ));
}

#[test]
fn schema_rejects_bad_remapping() {
    let config = SolConfig::from_value(json!({ "remappings": ["@oz/lib/oz/"] })).unwrap();
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::InvalidRemapping { .. })
    ));
}

#[test]
fn schema_rejects_empty_source_list() {
    let config = SolConfig::from_value(json!({ "paths": { "sources": [] } })).unwrap();
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::SchemaValidation { .. })
    ));
}

#[test]
fn fs_validator_catches_missing_sources_dir() {
    let dir = TempDir::new().expect("tempdir");
    let config = SolConfig::default();

    match FsValidator::new(dir.path()).validate(&config).unwrap_err() {
        ConfigError::SourceDirNotFound { path } => assert!(path.ends_with("contracts")),
        other => panic!("expected SourceDirNotFound, got {other:?}"),
    }
}

#[test]
fn fs_validator_catches_missing_root() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("contracts")).expect("create contracts dir");
    let config = SolConfig::from_value(json!({ "roots": ["contracts/Missing.sol"] })).unwrap();

    assert!(matches!(
        FsValidator::new(dir.path()).validate(&config),
        Err(ConfigError::RootNotFound { .. })
    ));
}

#[test]
fn fs_validator_accepts_complete_project() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("contracts")).expect("create contracts dir");
    fs::write(
        dir.path().join("contracts/Token.sol"),
        "pragma solidity ^0.8.0;",
    )
    .expect("write root");

    let config = SolConfig::from_value(json!({
        "solidity": "0.8.19",
        "roots": ["contracts/Token.sol"],
        "remappings": ["@oz/=lib/oz/"]
    }))
    .unwrap();

    assert!(FsValidator::new(dir.path()).validate(&config).is_ok());
}
