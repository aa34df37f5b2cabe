pub mod config;
pub mod discovery;
pub mod error;
pub mod solidity;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use solidity::*;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, discover};
pub use validation::{
    ConfigValidator, FsValidator, RemappingParts, RemappingSyntax, SchemaValidator,
    split_remapping, validate_fs, validate_remapping, validate_schema, validate_version,
};
