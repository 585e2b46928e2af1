//! Package resolution for the cpm CLI.
//!
//! Turns package identifiers (repository URIs, short registry names, or raw
//! CPM sources) into pinned CPM.cmake package sources.
//!
//! # Architecture
//!
//! - **Version Model**: strict SemVer parsing, precedence, and tag mapping
//! - **Repository Model**: host grammars, tag queries, source rendering
//! - **Registry Lookup**: ordered local mirrors of named package entries
//!
//! Network access ([`TagSource`]) and mirror synchronization
//! ([`RegistrySync`]) sit behind traits so resolution can run offline.

pub mod client;
pub mod error;
pub mod registry;
pub mod repository;
pub mod resolution;
pub mod sync;
pub mod version;

// Re-exports for convenience.
pub use client::{GithubTags, TagSource, GITHUB_API_URL};
pub use error::{RegistryError, Result};
pub use registry::{RegisteredPackage, RegistrySet, RegistrySource};
pub use repository::{Repository, RepositoryKind};
pub use resolution::{resolve_source, PackageIdentifier};
pub use sync::{GitSync, RegistrySync};
pub use version::{SemanticVersion, TaggedVersion};
