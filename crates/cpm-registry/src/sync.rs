//! Keeping local registry mirrors up to date.

use std::path::Path;
use std::process::Command;

use crate::error::{RegistryError, Result};

/// Brings a registry's local directory in line with its remote source.
pub trait RegistrySync {
    /// Clone or update registry `name` from `url` into `dir`.
    fn sync(&self, name: &str, url: &str, dir: &Path) -> Result<()>;
}

/// Synchronizes registries with the `git` executable.
///
/// A missing mirror is shallow-cloned; an existing one is fast-forwarded.
#[derive(Debug, Clone, Default)]
pub struct GitSync;

impl RegistrySync for GitSync {
    fn sync(&self, name: &str, url: &str, dir: &Path) -> Result<()> {
        if dir.join(".git").is_dir() {
            tracing::info!("updating registry '{name}'");
            run_git(name, &["pull", "--ff-only", "--quiet"], Some(dir))
        } else {
            tracing::info!("cloning registry '{name}' from {url}");
            if let Some(parent) = dir.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let target = dir.to_string_lossy();
            run_git(
                name,
                &["clone", "--depth", "1", "--quiet", url, target.as_ref()],
                None,
            )
        }
    }
}

fn run_git(registry: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| RegistryError::Sync {
        name: registry.to_string(),
        detail: format!("failed to execute git: {e}"),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RegistryError::Sync {
            name: registry.to_string(),
            detail: format!("git {} failed: {}", args.join(" "), stderr.trim()),
        });
    }
    Ok(())
}
