//! geodrill - groundwater bore design CLI
//!
//! # Usage
//!
//! ```bash
//! # Print a commented example design
//! geodrill template > bore_design.toml
//!
//! # Validate a design without running it
//! geodrill check --config bore_design.toml
//!
//! # Run the design and print the report
//! geodrill design --config bore_design.toml --pretty
//! ```
//!
//! # Environment Variables
//!
//! - `GEODRILL_CONFIG`: Path to the design file (when `--config` is omitted)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use geodrill::config::{ConfigProvenance, DesignConfig, TEMPLATE_TOML};
use geodrill::{DesignPipeline, DesignReport};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "geodrill")]
#[command(about = "Groundwater bore design: screen, pump and casing schedule")]
#[command(version)]
struct CliArgs {
    /// Log filter when RUST_LOG is unset (e.g. "debug", "geodrill=trace")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the design pipeline and emit the JSON report
    Design {
        /// Design file (default: $GEODRILL_CONFIG, then ./bore_design.toml)
        #[arg(short, long, env = "GEODRILL_CONFIG")]
        config: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Load and validate a design without running it
    Check {
        #[arg(short, long, env = "GEODRILL_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print a commented example design file
    Template,
}

fn init_logging(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<(DesignConfig, ConfigProvenance)> {
    match path {
        Some(p) => DesignConfig::load_from_file_with_provenance(p)
            .with_context(|| format!("Failed to load design file {}", p.display())),
        None => Ok(DesignConfig::load_with_provenance()),
    }
}

fn run_design(config: Option<PathBuf>, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let (config, provenance) = load_config(config.as_ref())?;
    config.log_overrides(&provenance);

    let mut store = config.build_store().context("Invalid design inputs")?;
    DesignPipeline::new()
        .run(&mut store)
        .context("Design calculation failed")?;

    let mut report = DesignReport::from_store(&store, config.well.name.clone())?;
    if let Some(chemistry) = &config.water_chemistry {
        match chemistry.langelier_saturation_index() {
            Ok(lsi) => {
                info!(lsi, "Langelier saturation index");
                report = report.with_langelier_saturation_index(lsi);
            }
            Err(e) => warn!(error = %e, "Skipping water corrosivity check"),
        }
    }

    match output {
        Some(path) => report
            .write_json(&path, pretty)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{}", report.to_json_string(pretty)?),
    }
    Ok(())
}

fn run_check(config: Option<PathBuf>) -> Result<()> {
    let (config, provenance) = load_config(config.as_ref())?;
    config.log_overrides(&provenance);
    let store = config.build_store().context("Invalid design inputs")?;
    info!(
        well = %config.well.name,
        production = store.is_production_well(),
        layers = store.aquifer_layers().len(),
        "Design is valid"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args);

    match args.command {
        SubCommand::Design { config, output, pretty } => run_design(config, output, pretty),
        SubCommand::Check { config } => run_check(config),
        SubCommand::Template => {
            print!("{TEMPLATE_TOML}");
            Ok(())
        }
    }
}
