//! `cpm add`: add packages and targets to the current project.

use std::path::Path;

use anyhow::Result;
use cpm_cmake::{CmakeProject, TargetKind};
use cpm_registry::{resolve_source, GitSync, GithubTags, RegistrySet, RegistrySync, TagSource};

use crate::config::Config;

/// Run `cpm add package <identifier>`.
pub fn package(cwd: &Path, config: &Config, identifier: &str) -> Result<()> {
    let project = super::require_project(cwd)?;
    let tags = GithubTags::new()?;
    let source = add_package_to(&project, identifier, &config.registry_set(), &GitSync, &tags)?;
    println!(
        "Added {} to {}",
        cpm_cmake::declaration_line(&source),
        project.list_file().display()
    );
    Ok(())
}

/// Resolve `identifier` and declare it in `project`. Returns the source that
/// was written.
pub(crate) fn add_package_to(
    project: &CmakeProject,
    identifier: &str,
    registries: &RegistrySet,
    sync: &dyn RegistrySync,
    tags: &dyn TagSource,
) -> Result<String> {
    let source = resolve_source(identifier, registries, sync, tags)?;
    project.add_package(&source)?;
    Ok(source)
}

/// Run `cpm add library <name>` or `cpm add executable <name>`.
pub fn target(cwd: &Path, name: &str, kind: TargetKind) -> Result<()> {
    let project = super::require_project(cwd)?;
    let dir = project.add_target(name, kind)?;
    println!("Created {kind} '{name}' in {}", dir.display());
    Ok(())
}
