//! `cpm create`: start a new project from a template repository.

use std::path::Path;

use anyhow::{bail, Context, Result};
use cpm_cmake::target::is_valid_target_name;
use cpm_cmake::{CmakeProject, TargetKind};
use cpm_registry::Repository;

use super::{run_tool, tool_output};
use crate::config::Config;

/// Run `cpm create <name> [--template <uri>]`.
///
/// The directory `name` is created relative to cwd.
pub fn run(cwd: &Path, config: &Config, name: &str, template: Option<&str>) -> Result<()> {
    let template = template.unwrap_or_else(|| config.template());
    create_project(&cwd.join(name), name, template)
}

pub(crate) fn create_project(project_dir: &Path, name: &str, template: &str) -> Result<()> {
    check_new_project(project_dir, name, template)?;

    let dir = project_dir.to_string_lossy();
    run_tool(
        "git",
        &[
            "clone",
            "--recursive",
            "--no-tags",
            "--single-branch",
            template,
            dir.as_ref(),
        ],
        None,
    )
    .context("failed to clone template")?;

    detach_history(project_dir)?;

    let project = CmakeProject::find(project_dir)?
        .filter(|p| p.root == project_dir)
        .with_context(|| format!("template {template} has no top-level project() call"))?;
    let target_dir = project.add_target(name, TargetKind::Executable)?;

    println!("Created project '{name}' from {template}");
    println!("  {}", target_dir.display());
    Ok(())
}

/// Validate arguments before anything touches the filesystem.
fn check_new_project(project_dir: &Path, name: &str, template: &str) -> Result<()> {
    if !is_valid_target_name(name) {
        bail!("invalid project name '{name}': use letters, digits, '_' and '-'");
    }
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }
    if Repository::parse(template).is_none() {
        bail!("failed to parse template repository URL: {template}");
    }
    Ok(())
}

/// Drop the template's remote and history, leaving a single `main` branch
/// with the template files staged.
fn detach_history(project_dir: &Path) -> Result<()> {
    let cwd = Some(project_dir);
    run_tool("git", &["remote", "remove", "origin"], cwd)
        .context("failed to remove template remote")?;

    let branch = tool_output("git", &["branch", "--show-current"], cwd)?;
    let orphan = format!("{branch}-copy");
    run_tool("git", &["checkout", "--quiet", "--orphan", &orphan], cwd)
        .context("failed to create orphan branch")?;
    run_tool("git", &["branch", "--quiet", "-D", &branch], cwd)
        .with_context(|| format!("failed to delete template branch {branch}"))?;
    run_tool("git", &["branch", "-m", "main"], cwd).context("failed to rename branch")?;
    Ok(())
}
