//! Registry error types.

use std::path::PathBuf;

use crate::repository::RepositoryKind;

/// Errors that can occur while resolving packages and repositories.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The repository is hosted somewhere we cannot query or render yet.
    #[error("unsupported repository host: {kind}")]
    UnsupportedHost { kind: RepositoryKind },

    /// Package not found in any configured registry.
    #[error("package not found in any registry: {name}")]
    PackageNotFound { name: String },

    /// A registry entry exists but cannot be used.
    #[error("invalid registry entry for '{name}' at {}: {detail}", path.display())]
    InvalidPackage {
        name: String,
        path: PathBuf,
        detail: String,
    },

    /// Invalid registry name in configuration.
    #[error("invalid registry name '{name}': {detail}")]
    InvalidRegistryName { name: String, detail: String },

    /// The host answered a tag query with a non-success status.
    #[error("tag query for {owner}/{name} failed with HTTP {status}")]
    HttpStatus {
        owner: String,
        name: String,
        status: u16,
    },

    /// Registry synchronization failed.
    #[error("failed to sync registry '{name}': {detail}")]
    Sync { name: String, detail: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
