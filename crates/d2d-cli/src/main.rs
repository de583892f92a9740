//! d2d-inventory CLI
//!
//! Resolves the SSH test inventory for one network architecture out of
//! NAC data model files

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use d2d_inventory::{AdapterRegistry, InventoryResolver};
use eyre::{bail, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod loader;
mod output;

use config::Config;
use output::Format;

#[derive(Parser)]
#[command(name = "d2d-inventory", version)]
#[command(about = "Resolve device inventories for D2D SSH testing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve devices and print connection records
    #[command(name = "resolve")]
    Resolve {
        /// Architecture key (CC, SDWAN, ...); defaults to the configured or detected one
        #[arg(short, long)]
        arch: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Data model files (yaml, json or toml), merged in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List registered architectures
    #[command(name = "architectures")]
    Architectures,

    /// Show which architectures the data model contains
    #[command(name = "detect")]
    Detect {
        /// Data model files (yaml, json or toml), merged in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load_default()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = AdapterRegistry::with_builtin();

    match cli.command {
        Commands::Resolve {
            arch,
            format,
            files,
        } => {
            let document = loader::load_files(&files)?;
            let key = match arch.or(config.resolve.architecture) {
                Some(key) => key,
                None => single_architecture(&registry.detect(&document))?,
            };
            let adapter = registry.require(&key)?;

            let resolution = InventoryResolver::from_env().resolve(&document, adapter.as_ref())?;
            for skip in &resolution.skipped {
                warn!(device_id = %skip.device_id, "skipped: {}", skip.reason);
            }
            eprintln!(
                "{}: {} resolved, {} skipped",
                adapter.architecture_name(),
                resolution.resolved_count(),
                resolution.skipped_count()
            );

            println!("{}", output::render(&resolution, format)?);
        }
        Commands::Architectures => {
            for key in registry.keys() {
                if let Some(adapter) = registry.get(&key) {
                    println!("{key}\t{}", adapter.architecture_name());
                }
            }
        }
        Commands::Detect { files } => {
            let document = loader::load_files(&files)?;
            let detected = registry.detect(&document);
            info!(count = detected.len(), "detected architectures");
            for key in detected {
                println!("{key}");
            }
        }
    }

    Ok(())
}

/// The only architecture present in the data model
fn single_architecture(detected: &[String]) -> eyre::Result<String> {
    match detected {
        [key] => Ok(key.clone()),
        [] => Err(eyre!(
            "no known architecture found in the data model; pass --arch"
        )),
        _ => bail!(
            "data model contains several architectures ({}); pass --arch",
            detected.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "d2d-inventory",
            "resolve",
            "--arch",
            "sdwan",
            "--format",
            "table",
            "a.yaml",
            "b.yaml",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                arch,
                format,
                files,
            } => {
                assert_eq!(arch.as_deref(), Some("sdwan"));
                assert_eq!(format, Format::Table);
                assert_eq!(files.len(), 2);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_resolve_requires_files() {
        assert!(Cli::try_parse_from(["d2d-inventory", "resolve"]).is_err());
    }

    #[test]
    fn test_single_architecture() {
        assert_eq!(single_architecture(&["CC".to_string()]).unwrap(), "CC");
        assert!(single_architecture(&[]).is_err());

        let err = single_architecture(&["CC".to_string(), "SDWAN".to_string()]).unwrap_err();
        assert!(err.to_string().contains("CC, SDWAN"));
    }
}
