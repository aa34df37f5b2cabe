//! Compiler version algebra.
//!
//! A [`VersionDomain`] fixes the ordered list of versions the resolver knows
//! about; a [`VersionSet`] is a bit vector over that list. Pragma expressions
//! evaluate to sets, files AND their pragmas together, and roots AND the sets
//! of every file they reach.

mod catalog;
mod domain;
mod expr;
mod literal;
mod set;

pub use domain::VersionDomain;
pub use expr::{VersionExpr, VersionPragma, compatible_set};
pub use literal::VersionLiteral;
pub use set::VersionSet;

/// Re-exported so callers need not depend on `semver` directly.
pub use semver::Version;
