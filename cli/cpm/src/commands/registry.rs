//! Registry CLI commands: list, add, remove, sync.

use anyhow::{bail, Result};
use cpm_registry::GitSync;

use crate::config::Config;

/// Run `cpm registry list`.
pub fn list(config: &Config) -> Result<()> {
    if config.registries.is_empty() {
        println!("No registries configured");
        println!("  add one with: cpm registry add <name> <url>");
        return Ok(());
    }

    let set = config.registry_set();
    for source in set.registries() {
        let mirror = set.registry_dir(source);
        let state = if mirror.is_dir() { "synced" } else { "not synced" };
        println!("{:<16} {}  ({state})", source.name, source.url);
    }
    Ok(())
}

/// Run `cpm registry add <name> <url>`.
pub fn add(config: &mut Config, name: &str, url: &str) -> Result<()> {
    config.add_registry(name, url)?;
    config.save()?;
    println!("Added registry '{name}' ({url})");
    Ok(())
}

/// Run `cpm registry remove <name>`.
///
/// The local mirror is deleted along with the configuration entry.
pub fn remove(config: &mut Config, name: &str) -> Result<()> {
    let set = config.registry_set();
    let mirror = set
        .registries()
        .iter()
        .find(|r| r.name == name)
        .map(|r| set.registry_dir(r));

    config.remove_registry(name)?;
    config.save()?;

    if let Some(mirror) = mirror.filter(|m| m.is_dir()) {
        std::fs::remove_dir_all(&mirror)?;
        tracing::debug!("removed mirror {}", mirror.display());
    }
    println!("Removed registry '{name}'");
    Ok(())
}

/// Run `cpm registry sync`.
pub fn sync(config: &Config) -> Result<()> {
    let set = config.registry_set();
    let failures = set.sync_all(&GitSync);
    for failure in &failures {
        eprintln!("  {failure}");
    }
    if !failures.is_empty() {
        bail!(
            "{} of {} registries failed to sync",
            failures.len(),
            set.registries().len()
        );
    }
    println!("Synced {} registries", set.registries().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_path_buf();

        let mut config = Config::load(home.clone()).unwrap();
        add(&mut config, "main", "https://github.com/acme/registry.git").unwrap();
        assert_eq!(Config::load(home.clone()).unwrap().registries.len(), 1);

        let mirror = home.join("registries").join("main");
        std::fs::create_dir_all(&mirror).unwrap();
        list(&config).unwrap();

        remove(&mut config, "main").unwrap();
        assert!(Config::load(home).unwrap().registries.is_empty());
        assert!(!mirror.exists());
    }

    #[test]
    fn remove_unknown_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(dir.path().to_path_buf()).unwrap();
        assert!(remove(&mut config, "nope").is_err());
    }

    #[test]
    fn sync_with_no_registries() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_path_buf()).unwrap();
        sync(&config).unwrap();
    }
}
