//! CLI command implementations.

pub mod add;
pub mod build;
pub mod create;
pub mod list;
pub mod registry;
pub mod versions;

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use cpm_cmake::CmakeProject;

/// The project enclosing `cwd`, or an error when there is none.
pub(crate) fn require_project(cwd: &Path) -> Result<CmakeProject> {
    CmakeProject::find(cwd)?
        .context("the current directory is not inside a CMake project")
}

/// Run an external tool with inherited stdio, failing on a non-zero exit.
pub(crate) fn run_tool(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    tracing::debug!("running {program} {}", args.join(" "));
    let status = command
        .status()
        .with_context(|| format!("failed to run {program}; is it installed?"))?;
    if !status.success() {
        bail!("{program} {} failed with {status}", args.join(" "));
    }
    Ok(())
}

/// Run an external tool and capture its trimmed stdout.
pub(crate) fn tool_output(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command
        .output()
        .with_context(|| format!("failed to run {program}; is it installed?"))?;
    if !output.status.success() {
        bail!(
            "{program} {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_project_outside_project() {
        let dir = tempfile::tempdir().unwrap();
        let err = require_project(dir.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the current directory is not inside a CMake project"
        );
    }

    #[test]
    fn missing_tool_is_an_error() {
        let err = run_tool("cpm-no-such-tool", &["--version"], None).unwrap_err();
        assert!(err.to_string().contains("cpm-no-such-tool"));
        assert!(tool_output("cpm-no-such-tool", &[], None).is_err());
    }
}
