//! CMake project discovery.

use std::path::{Path, PathBuf};

use crate::error::{CmakeError, Result};
use crate::patch;
use crate::scan;
use crate::target::{self, TargetKind};

/// Root list file name.
pub const LIST_FILE: &str = "CMakeLists.txt";

/// A CMake project: the directory holding the top-level list file that
/// declares `project(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmakeProject {
    pub root: PathBuf,
    pub name: String,
}

impl CmakeProject {
    /// Search upward from `start_dir` for a list file with a `project(...)`
    /// call. List files without one (sub-directories of a larger project)
    /// are skipped.
    pub fn find(start_dir: &Path) -> Result<Option<Self>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(LIST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate).map_err(|e| CmakeError::Read {
                    path: candidate.clone(),
                    source: e,
                })?;
                if let Some(name) = scan::project_name(&content) {
                    tracing::debug!("found project '{name}' at {}", dir.display());
                    return Ok(Some(CmakeProject {
                        name: name.to_string(),
                        root: dir,
                    }));
                }
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Path of the root list file.
    pub fn list_file(&self) -> PathBuf {
        self.root.join(LIST_FILE)
    }

    /// Default build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Insert a package declaration into the root list file.
    pub fn add_package(&self, source: &str) -> Result<()> {
        patch::add_package(&self.list_file(), source)
    }

    /// Sources of all package declarations in the root list file.
    pub fn declarations(&self) -> Result<Vec<String>> {
        let path = self.list_file();
        let content = std::fs::read_to_string(&path).map_err(|e| CmakeError::Read {
            path: path.clone(),
            source: e,
        })?;
        Ok(scan::declarations(&content)
            .into_iter()
            .map(|d| d.source.to_string())
            .collect())
    }

    /// Create a new target in its own sub-directory.
    pub fn add_target(&self, name: &str, kind: TargetKind) -> Result<PathBuf> {
        target::create_target(&self.root, &self.name, name, kind)
    }
}
