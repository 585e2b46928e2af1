//! cpm: manage CPM.cmake dependencies and targets of CMake projects.

mod commands;
mod config;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use cpm_cmake::TargetKind;
use tracing_subscriber::EnvFilter;

use commands::build::BuildType;
use config::Config;

#[derive(Parser)]
#[command(name = "cpm", version, about = "Package and project manager for CPM.cmake projects")]
struct Cli {
    /// Log verbosity; RUST_LOG takes precedence when set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a template repository
    Create {
        /// Project name; also the directory and the first executable target
        name: String,
        /// Template repository URL (default: configured or ModernCppStarter)
        #[arg(long)]
        template: Option<String>,
    },
    /// Add a package or a new target to the current project
    Add {
        #[command(subcommand)]
        action: AddAction,
    },
    /// List the packages declared by the current project
    List,
    /// List the released versions of a package
    Versions {
        /// Repository URL or registry package name
        identifier: String,
        /// Tag prefix stripped before version parsing
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Configure the project with CMake
    Configure {
        #[arg(value_enum)]
        build_type: Option<BuildType>,
    },
    /// Build the project with CMake, configuring first if needed
    Build {
        #[arg(value_enum)]
        build_type: Option<BuildType>,
    },
    /// Manage package registries
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
}

#[derive(Subcommand)]
enum AddAction {
    /// Add a package dependency (repository URL, registry name, or CPM source)
    Package {
        identifier: String,
    },
    /// Create a library target
    Library {
        name: String,
    },
    /// Create an executable target
    Executable {
        name: String,
    },
}

#[derive(Subcommand)]
enum RegistryAction {
    /// List configured registries
    List,
    /// Add a registry at the end of the lookup order
    Add {
        /// Registry name
        name: String,
        /// Git URL of the registry repository
        url: String,
    },
    /// Remove a registry and its local mirror
    Remove {
        /// Registry name
        name: String,
    },
    /// Clone or update every registry mirror
    Sync,
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn initialize_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::load(config::default_home()?)?;
    tracing::debug!("using data directory {}", config.paths.home.display());

    match cli.command {
        Commands::Create { name, template } => {
            commands::create::run(&cwd, &config, &name, template.as_deref())
        }

        Commands::Add { action } => match action {
            AddAction::Package { identifier } => {
                commands::add::package(&cwd, &config, &identifier)
            }
            AddAction::Library { name } => commands::add::target(&cwd, &name, TargetKind::Library),
            AddAction::Executable { name } => {
                commands::add::target(&cwd, &name, TargetKind::Executable)
            }
        },

        Commands::List => commands::list::run(&cwd),

        Commands::Versions { identifier, prefix } => {
            commands::versions::run(&config, &identifier, prefix.as_deref())
        }

        Commands::Configure { build_type } => commands::build::configure(&cwd, build_type),

        Commands::Build { build_type } => commands::build::build(&cwd, build_type),

        Commands::Registry { action } => match action {
            RegistryAction::List => commands::registry::list(&config),
            RegistryAction::Add { name, url } => commands::registry::add(&mut config, &name, &url),
            RegistryAction::Remove { name } => commands::registry::remove(&mut config, &name),
            RegistryAction::Sync => commands::registry::sync(&config),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_add_package() {
        let cli = Cli::try_parse_from(["cpm", "add", "package", "gh:fmtlib/fmt@10.2.1"]).unwrap();
        match cli.command {
            Commands::Add {
                action: AddAction::Package { identifier },
            } => assert_eq!(identifier, "gh:fmtlib/fmt@10.2.1"),
            _ => panic!("expected add package"),
        }
    }

    #[test]
    fn parse_build_type_and_log_level() {
        let cli = Cli::try_parse_from(["cpm", "build", "release", "--log-level", "debug"]).unwrap();
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert!(matches!(
            cli.command,
            Commands::Build {
                build_type: Some(BuildType::Release)
            }
        ));

        let cli = Cli::try_parse_from(["cpm", "configure"]).unwrap();
        assert!(matches!(cli.log_level, LogLevel::Warn));
        assert!(matches!(cli.command, Commands::Configure { build_type: None }));
    }

    #[test]
    fn reject_unknown_build_type() {
        assert!(Cli::try_parse_from(["cpm", "build", "profile"]).is_err());
    }
}
