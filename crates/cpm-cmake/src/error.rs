//! Error types for list file patching and scaffolding.

use std::path::PathBuf;

/// Errors that can occur while editing a CMake project.
#[derive(Debug, thiserror::Error)]
pub enum CmakeError {
    /// The list file does not include `CPM.cmake`, so there is no safe place
    /// to insert a declaration.
    #[error("{} does not include CPM.cmake; the project does not seem to use CPM", path.display())]
    AnchorNotFound {
        /// The list file that was scanned.
        path: PathBuf,
    },

    /// A package source that would not survive as a declaration argument.
    #[error("invalid package source '{source_text}': must be non-empty without whitespace, quotes or backslashes")]
    InvalidSource {
        /// The rejected source.
        source_text: String,
    },

    /// A target name that cannot be used as a directory and CMake target.
    #[error("invalid target name '{name}': use ASCII letters, digits, '_' or '-'")]
    InvalidTargetName {
        /// The rejected name.
        name: String,
    },

    /// The target directory already exists.
    #[error("target directory already exists: {}", path.display())]
    TargetExists {
        /// The existing directory.
        path: PathBuf,
    },

    /// Reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CMake project operations.
pub type Result<T> = std::result::Result<T, CmakeError>;
