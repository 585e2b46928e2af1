//! Named package lookup across locally mirrored registries.
//!
//! Layout of the registry root:
//! ```text
//! <root>/
//!   <registry-name>/
//!     <package-name>.json   { "repository": "<uri>", "versionPrefix": "<prefix>" }
//! ```
//!
//! Registries are searched in configuration order and the first registry that
//! has an entry for a package wins; entries are never merged.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RegistryError, Result};
use crate::repository::Repository;
use crate::sync::RegistrySync;

/// A configured registry: a name (its directory under the root) and the
/// remote it mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    pub name: String,
    pub url: String,
}

impl RegistrySource {
    /// Create a registry source, rejecting names that are not a single path
    /// component.
    pub fn new(name: &str, url: &str) -> Result<Self> {
        validate_name(name).map_err(|detail| RegistryError::InvalidRegistryName {
            name: name.to_string(),
            detail: detail.to_string(),
        })?;
        Ok(RegistrySource {
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

fn validate_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name == "." || name == ".." {
        return Err("name is a relative path component");
    }
    if name.contains(['/', '\\']) {
        return Err("name contains a path separator");
    }
    Ok(())
}

/// A package definition read from a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPackage {
    /// Where the package lives. Entries may omit it.
    pub repository: Option<Repository>,
    /// Stripped from tag names before version parsing.
    pub version_prefix: String,
    /// The entry file this package was read from.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageEntry {
    #[serde(default)]
    repository: Option<String>,
    #[serde(default)]
    version_prefix: Option<String>,
}

impl RegisteredPackage {
    /// Parse a registry entry read from `path`. `name` only labels errors.
    pub fn parse(name: &str, path: &Path, json: &str) -> Result<Self> {
        let invalid = |detail: String| RegistryError::InvalidPackage {
            name: name.to_string(),
            path: path.to_path_buf(),
            detail,
        };

        let entry: PackageEntry =
            serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;

        let repository = match entry.repository {
            Some(uri) => Some(
                Repository::parse(&uri)
                    .ok_or_else(|| invalid(format!("unrecognized repository URI '{uri}'")))?,
            ),
            None => None,
        };

        Ok(RegisteredPackage {
            repository,
            version_prefix: entry.version_prefix.unwrap_or_default(),
            path: path.to_path_buf(),
        })
    }
}

/// The ordered set of registries mirrored under a common root directory.
#[derive(Debug, Clone)]
pub struct RegistrySet {
    root: PathBuf,
    registries: Vec<RegistrySource>,
}

impl RegistrySet {
    /// Create a registry set rooted at `root`. Order of `registries` is the
    /// lookup order.
    pub fn new(root: PathBuf, registries: Vec<RegistrySource>) -> Self {
        RegistrySet { root, registries }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registries(&self) -> &[RegistrySource] {
        &self.registries
    }

    /// Local mirror directory of a registry.
    pub fn registry_dir(&self, source: &RegistrySource) -> PathBuf {
        self.root.join(&source.name)
    }

    /// Synchronize every registry, returning the failures.
    ///
    /// Failures are logged and do not stop the remaining registries.
    pub fn sync_all(&self, sync: &dyn RegistrySync) -> Vec<RegistryError> {
        let mut failures = Vec::new();
        for source in &self.registries {
            if let Err(e) = sync.sync(&source.name, &source.url, &self.registry_dir(source)) {
                tracing::warn!("{e}");
                failures.push(e);
            }
        }
        failures
    }

    /// Look up a package by short name.
    ///
    /// Registries are synchronized first; a registry that fails to sync is
    /// still searched using whatever is on disk. Returns `Ok(None)` when no
    /// registry has the package. A malformed entry is an error and does not
    /// fall through to later registries.
    pub fn find_package(
        &self,
        name: &str,
        sync: &dyn RegistrySync,
    ) -> Result<Option<RegisteredPackage>> {
        if validate_name(name).is_err() || name.starts_with('.') {
            tracing::debug!("'{name}' is not a valid package name");
            return Ok(None);
        }

        self.sync_all(sync);

        let file_name = format!("{name}.json");
        for source in &self.registries {
            let path = self.registry_dir(source).join(&file_name);
            if !path.is_file() {
                tracing::debug!("{name} not found in registry '{}'", source.name);
                continue;
            }

            tracing::debug!("found {name} in registry '{}'", source.name);
            let content = std::fs::read_to_string(&path)?;
            return RegisteredPackage::parse(name, &path, &content).map(Some);
        }

        Ok(None)
    }
}
