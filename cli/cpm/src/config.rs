//! User configuration and data directory layout.
//!
//! Everything lives under one data root (`$CPM_CLI_HOME`, defaulting to
//! `~/.local/share/cpm-cli`):
//!
//! ```text
//! <home>/
//!   config.toml      # registries and defaults
//!   registries/
//!     <name>/        # local mirror of each registry
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cpm_registry::{RegistrySet, RegistrySource};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "CPM_CLI_HOME";

/// Template cloned by `cpm create` unless configured otherwise.
pub const DEFAULT_TEMPLATE: &str = "https://github.com/TheLartians/ModernCppStarter.git";

/// Filesystem locations used by the CLI.
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
    pub config_file: PathBuf,
    pub registries: PathBuf,
}

impl Paths {
    pub fn new(home: PathBuf) -> Self {
        Paths {
            config_file: home.join("config.toml"),
            registries: home.join("registries"),
            home,
        }
    }
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    /// Registry name → remote URL, in lookup order.
    #[serde(default)]
    registries: toml::Table,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    create: Option<CreateConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CreateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<String>,
}

/// Loaded configuration. Built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    pub registries: Vec<RegistrySource>,
    template: Option<String>,
}

/// Resolve the data root from the environment.
pub fn default_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let user_home = std::env::var_os("HOME").context("neither CPM_CLI_HOME nor HOME is set")?;
    Ok(PathBuf::from(user_home)
        .join(".local")
        .join("share")
        .join("cpm-cli"))
}

impl Config {
    /// Load the configuration under `home`. A missing file is an empty
    /// configuration.
    pub fn load(home: PathBuf) -> Result<Self> {
        let paths = Paths::new(home);
        let file = if paths.config_file.is_file() {
            let content = std::fs::read_to_string(&paths.config_file)
                .with_context(|| format!("reading {}", paths.config_file.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing {}", paths.config_file.display()))?
        } else {
            ConfigFile::default()
        };

        let registries = parse_registries(&file.registries, &paths.config_file)?;
        let template = file.create.and_then(|c| c.template);

        Ok(Config {
            paths,
            registries,
            template,
        })
    }

    /// Write the configuration back to `config.toml`.
    pub fn save(&self) -> Result<()> {
        let mut registries = toml::Table::new();
        for source in &self.registries {
            registries.insert(source.name.clone(), toml::Value::String(source.url.clone()));
        }
        let file = ConfigFile {
            registries,
            create: self.template.clone().map(|template| CreateConfig {
                template: Some(template),
            }),
        };

        let content = toml::to_string_pretty(&file).context("serializing configuration")?;
        std::fs::create_dir_all(&self.paths.home)
            .with_context(|| format!("creating {}", self.paths.home.display()))?;
        std::fs::write(&self.paths.config_file, content)
            .with_context(|| format!("writing {}", self.paths.config_file.display()))?;
        Ok(())
    }

    /// Template repository for `cpm create`.
    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The configured registries, mirrored under the data root.
    pub fn registry_set(&self) -> RegistrySet {
        RegistrySet::new(self.paths.registries.clone(), self.registries.clone())
    }

    /// Append a registry at the end of the lookup order.
    pub fn add_registry(&mut self, name: &str, url: &str) -> Result<()> {
        if self.registries.iter().any(|r| r.name == name) {
            bail!("registry '{name}' already exists");
        }
        if url.trim().is_empty() {
            bail!("registry URL must not be empty");
        }
        self.registries.push(RegistrySource::new(name, url)?);
        Ok(())
    }

    /// Remove a registry by name.
    pub fn remove_registry(&mut self, name: &str) -> Result<()> {
        let initial_len = self.registries.len();
        self.registries.retain(|r| r.name != name);
        if self.registries.len() == initial_len {
            bail!("registry '{name}' not found");
        }
        Ok(())
    }
}

fn parse_registries(table: &toml::Table, config_file: &Path) -> Result<Vec<RegistrySource>> {
    table
        .iter()
        .map(|(name, value)| {
            let url = value.as_str().with_context(|| {
                format!(
                    "{}: registry '{name}' must map to a URL string",
                    config_file.display()
                )
            })?;
            Ok(RegistrySource::new(name, url)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(home: &Path, content: &str) {
        std::fs::create_dir_all(home).unwrap();
        std::fs::write(home.join("config.toml"), content).unwrap();
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("home")).unwrap();
        assert!(config.registries.is_empty());
        assert_eq!(config.template(), DEFAULT_TEMPLATE);
        assert_eq!(config.paths.registries, dir.path().join("home/registries"));
    }

    #[test]
    fn registry_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[registries]
zeta = "https://github.com/acme/zeta.git"
alpha = "https://github.com/acme/alpha.git"
mid = "https://github.com/acme/mid.git"
"#,
        );

        let config = Config::load(dir.path().to_path_buf()).unwrap();
        let names: Vec<&str> = config.registries.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);

        let set = config.registry_set();
        assert_eq!(set.registries().len(), 3);
        assert_eq!(set.root(), dir.path().join("registries"));
    }

    #[test]
    fn template_override() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[create]\ntemplate = \"https://github.com/acme/starter\"\n",
        );
        let config = Config::load(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.template(), "https://github.com/acme/starter");
    }

    #[test]
    fn reject_non_string_registry() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[registries]\nmain = 3\n");
        let err = Config::load(dir.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("must map to a URL string"));
    }

    #[test]
    fn reject_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "this is not valid toml [[[");
        assert!(Config::load(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn add_remove_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");

        {
            let mut config = Config::load(home.clone()).unwrap();
            config.add_registry("second", "https://github.com/acme/b.git").unwrap();
            config.add_registry("first", "https://github.com/acme/a.git").unwrap();
            config.add_registry("gone", "https://github.com/acme/c.git").unwrap();
            config.remove_registry("gone").unwrap();
            config.save().unwrap();
        }

        let config = Config::load(home).unwrap();
        let names: Vec<&str> = config.registries.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[test]
    fn add_duplicate_or_invalid_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(dir.path().to_path_buf()).unwrap();
        config.add_registry("main", "https://github.com/acme/r.git").unwrap();

        assert!(config.add_registry("main", "https://github.com/acme/other.git").is_err());
        assert!(config.add_registry("a/b", "https://github.com/acme/r.git").is_err());
        assert!(config.add_registry("empty-url", " ").is_err());
        assert!(config.remove_registry("missing").is_err());
    }
}
