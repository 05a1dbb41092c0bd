#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the Vélib station pipeline.
//!
//! ```text
//! velib_map summary [--zones "Paris - 11e arrondissement,Montreuil"]
//! velib_map export
//! velib_map zones
//! ```
//!
//! Every subcommand accepts `--config <file>`; without it the inputs are
//! read from the data directory (`$VELIB_MAP_DATA_DIR` or `data/`).

mod report;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use velib_map_analytics::filter_options;
use velib_map_pipeline::{PipelineConfig, run};

#[derive(Parser)]
#[command(
    name = "velib_map",
    about = "Station capacities of the Vélib network by arrondissement and commune"
)]
struct Cli {
    /// Pipeline configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print key figures, capacity quantiles and the per-zone table
    Summary {
        /// Only include these zones (comma-separated; all when omitted)
        #[arg(long, value_delimiter = ',')]
        zones: Vec<String>,
    },
    /// Print stations, zone summaries and global stats as JSON
    Export,
    /// List zone labels with their chart colors
    Zones,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let output = run(&config)?;

    match cli.command {
        Commands::Summary { zones } => {
            let selection: BTreeSet<String> = zones
                .into_iter()
                .map(|zone| zone.trim().to_string())
                .filter(|zone| !zone.is_empty())
                .collect();

            let options = filter_options(&output.stations);
            for zone in selection.iter().filter(|zone| !options.contains(zone)) {
                log::warn!("No stations in zone '{zone}'");
            }

            print!("{}", report::render_summary(&output, &selection));
        }
        Commands::Export => {
            let json = serde_json::to_string_pretty(&output)?;
            println!("{json}");
        }
        Commands::Zones => {
            print!("{}", report::render_zones(&output));
        }
    }

    Ok(())
}
