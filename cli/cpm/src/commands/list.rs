//! `cpm list`: show the packages declared by the current project.

use std::path::Path;

use anyhow::Result;

/// Run `cpm list`.
pub fn run(cwd: &Path) -> Result<()> {
    let project = super::require_project(cwd)?;
    let sources = project.declarations()?;

    if sources.is_empty() {
        println!("No packages declared in {}", project.list_file().display());
        return Ok(());
    }

    println!("{} ({} packages):", project.name, sources.len());
    for source in &sources {
        println!("  {source}");
    }
    Ok(())
}
