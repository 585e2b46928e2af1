//! Turning a user-supplied package identifier into a CPM package source.
//!
//! An identifier is one of:
//! - a repository URI (`https://github.com/fmtlib/fmt`), pinned to its
//!   newest version tag;
//! - a short registry name (`fmt`), looked up in the registries and then
//!   pinned the same way using the entry's version prefix;
//! - anything containing `:` that is not a known URI (`gh:fmtlib/fmt@10.2.1`),
//!   which is already a CPM source and passes through unchanged.

use crate::client::TagSource;
use crate::error::{RegistryError, Result};
use crate::registry::RegistrySet;
use crate::repository::Repository;
use crate::sync::RegistrySync;

/// How an identifier was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageIdentifier {
    Repository(Repository),
    RegistryName(String),
    Source(String),
}

impl PackageIdentifier {
    /// Classify an identifier. Never fails; see the module docs for the rules.
    pub fn classify(identifier: &str) -> Self {
        if let Some(repository) = Repository::parse(identifier) {
            PackageIdentifier::Repository(repository)
        } else if !identifier.contains(':') {
            PackageIdentifier::RegistryName(identifier.to_string())
        } else {
            PackageIdentifier::Source(identifier.to_string())
        }
    }
}

/// Resolve an identifier to the source string of a `CPMAddPackage` call.
pub fn resolve_source(
    identifier: &str,
    registries: &RegistrySet,
    sync: &dyn RegistrySync,
    tags: &dyn TagSource,
) -> Result<String> {
    match PackageIdentifier::classify(identifier) {
        PackageIdentifier::Repository(repository) => {
            repository.cpm_definition_for_latest_version(tags, "")
        }
        PackageIdentifier::RegistryName(name) => {
            let package = registries
                .find_package(&name, sync)?
                .ok_or_else(|| RegistryError::PackageNotFound { name: name.clone() })?;

            let repository = package.repository.ok_or_else(|| RegistryError::InvalidPackage {
                name: name.clone(),
                path: package.path.clone(),
                detail: "entry has no repository".to_string(),
            })?;

            repository.cpm_definition_for_latest_version(tags, &package.version_prefix)
        }
        PackageIdentifier::Source(source) => Ok(source),
    }
}
