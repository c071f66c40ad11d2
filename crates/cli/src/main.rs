use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use colored::Colorize;
use pc_core::config::store::{ConfigStore, StoreOptions};
use pc_core::init::{generate_plugin_tree, InitOptions};
use pc_core::plugins::{generate_configs, ManifestProvider, PLUGINS_DIR};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plugconf")]
#[command(about = "Layered configuration for plugin families", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold an example plugin tree
    Init {
        /// Directory to create `plugins/` in
        #[arg(long, default_value = ".")]
        target: PathBuf,
        /// Overwrite an existing plugins directory
        #[arg(long)]
        force: bool,
        /// Only scaffold the train family
        #[arg(long)]
        minimal: bool,
    },
    /// Create missing config files for every plugin family
    Generate {
        /// Application root holding `plugins/` and `config/`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
    /// Print the resolved options of one section as JSON
    Show {
        /// Plugin family, e.g. `train`
        #[arg(long)]
        family: String,
        /// Section to resolve; global sections are always merged in
        #[arg(long, default_value = "global")]
        section: String,
        /// Application root holding `plugins/` and `config/`
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Read this file instead of `<root>/config/<family>.ini`
        #[arg(long)]
        config_file: Option<PathBuf>,
        /// Only print options that can change for existing models
        #[arg(long)]
        mutable: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Level is overridden by `RUST_LOG`; stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Init {
            target,
            force,
            minimal,
        } => {
            let written = generate_plugin_tree(InitOptions {
                target_dir: target,
                force,
                minimal,
            })
            .wrap_err("Failed to scaffold plugin tree")?;
            info!(files = written.len(), "Scaffolded plugin tree");
            for path in &written {
                println!("{} {}", "wrote".green(), path.display());
            }
        }
        Commands::Generate { root } => {
            let created = generate_configs(&root).wrap_err("Failed to generate plugin configs")?;
            info!(created = created.len(), root = %root.display(), "Generated plugin configs");
            if created.is_empty() {
                println!("{}", "All plugin configs already exist".dimmed());
            }
            for path in &created {
                println!("{} {}", "created".green(), path.display());
            }
        }
        Commands::Show {
            family,
            section,
            root,
            config_file,
            mutable,
        } => {
            let provider = ManifestProvider::for_family(&root.join(PLUGINS_DIR), &family);
            debug!(family = %family, section = %section, mutable, "Resolving options");
            let options = StoreOptions { root, config_file };
            let store = ConfigStore::load(&provider, section, options)
                .wrap_err_with(|| format!("Failed to load config for '{family}'"))?;
            let resolved = if mutable {
                store.mutable_options()?
            } else {
                store.resolved_options_for_section()?
            };
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }
    Ok(())
}
