//! `cpm versions`: list the released versions of a package.

use anyhow::{bail, Context, Result};
use cpm_registry::{
    GitSync, GithubTags, PackageIdentifier, RegistrySet, RegistrySync, Repository, TagSource,
    TaggedVersion,
};

use crate::config::Config;

/// Run `cpm versions <identifier> [--prefix <prefix>]`.
pub fn run(config: &Config, identifier: &str, prefix: Option<&str>) -> Result<()> {
    let tags = GithubTags::new()?;
    let versions = query(identifier, prefix, &config.registry_set(), &GitSync, &tags)?;

    if versions.is_empty() {
        println!("No versions found for {identifier}");
        return Ok(());
    }
    let last = versions.len() - 1;
    for (i, tagged) in versions.iter().enumerate() {
        let marker = if i == last { "  (latest)" } else { "" };
        if tagged.tag == tagged.version.to_string() {
            println!("{}{marker}", tagged.version);
        } else {
            println!("{}  [tag {}]{marker}", tagged.version, tagged.tag);
        }
    }
    Ok(())
}

/// Versions of `identifier`, oldest first. An explicit `prefix` overrides
/// the registry entry's.
pub(crate) fn query(
    identifier: &str,
    prefix: Option<&str>,
    registries: &RegistrySet,
    sync: &dyn RegistrySync,
    tags: &dyn TagSource,
) -> Result<Vec<TaggedVersion>> {
    let (repository, entry_prefix) = match PackageIdentifier::classify(identifier) {
        PackageIdentifier::Repository(repository) => (repository, String::new()),
        PackageIdentifier::RegistryName(name) => {
            let package = registries
                .find_package(&name, sync)?
                .with_context(|| format!("package '{name}' not found in any registry"))?;
            let repository: Repository = package
                .repository
                .with_context(|| format!("registry entry for '{name}' has no repository"))?;
            (repository, package.version_prefix)
        }
        PackageIdentifier::Source(source) => {
            bail!("cannot list versions of '{source}'; pass a repository URL or package name")
        }
    };

    let prefix = prefix.unwrap_or(&entry_prefix);
    Ok(repository.query_versions(tags, prefix)?)
}
