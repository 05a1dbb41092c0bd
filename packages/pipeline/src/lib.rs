#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The station pipeline: load the export, normalize rows, assign zones and
//! aggregate capacities.
//!
//! A run is a pure function of its three input files. [`run`] reads them
//! from disk; [`run_with`] takes an already loaded table and zone indexes.
//! [`PipelineCache`] skips runs whose inputs have not changed.

pub mod cache;
pub mod config;
pub mod paths;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use velib_map_analytics::{global_stats, summarize_by_zone};
use velib_map_analytics_models::{GlobalStats, ZoneSummary};
use velib_map_station::columns::default_mapping;
use velib_map_station::{RawTable, StationError, load_table, normalize_table};
use velib_map_station_models::{ColumnMapping, NormalizedStation, Station};
use velib_map_zone::{ZoneAssigner, ZoneError};

pub use cache::PipelineCache;
pub use config::PipelineConfig;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The station export could not be loaded.
    #[error(transparent)]
    Station(#[from] StationError),

    /// A zone layer could not be prepared.
    #[error(transparent)]
    Zone(#[from] ZoneError),

    /// The configuration is invalid.
    #[error("Invalid pipeline configuration: {message}")]
    Config {
        /// What is wrong with it.
        message: String,
    },

    /// A configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// The three structures handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineOutput {
    /// Working set: stations with coordinates and capacity.
    pub stations: Vec<Station>,
    /// One row per zone, by descending total capacity.
    pub by_zone: Vec<ZoneSummary>,
    /// Station count and capacity quantiles.
    pub stats: GlobalStats,
}

/// Runs the pipeline on the files named in `config`.
///
/// # Errors
///
/// Returns [`PipelineError`] if the configuration is invalid, the station
/// export cannot be read, or a zone layer is missing or unusable.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let delimiter = config.delimiter_byte()?;

    // Reference layers first: a missing layer aborts before the export is parsed.
    let assigner = ZoneAssigner::load(&config.arrondissements, &config.communes)?;
    let table = load_table(&config.stations, delimiter)?;

    let mapping = config.columns.clone().unwrap_or_else(default_mapping);

    Ok(run_with(&table, &mapping, &assigner))
}

/// Runs the pipeline on a loaded table.
#[must_use]
pub fn run_with(table: &RawTable, mapping: &ColumnMapping, assigner: &ZoneAssigner) -> PipelineOutput {
    let mut normalized = normalize_table(table, mapping);
    assigner.assign(&mut normalized);

    let stations = working_set(normalized);
    let by_zone = summarize_by_zone(&stations);
    let stats = global_stats(&stations);

    log::info!(
        "Pipeline produced {} stations in {} zones",
        stations.len(),
        by_zone.len()
    );

    PipelineOutput {
        stations,
        by_zone,
        stats,
    }
}

/// Keeps the stations with coordinates and capacity.
fn working_set(normalized: Vec<NormalizedStation>) -> Vec<Station> {
    let total = normalized.len();
    let stations: Vec<Station> = normalized
        .into_iter()
        .filter_map(NormalizedStation::into_station)
        .collect();

    if stations.len() < total {
        log::debug!(
            "Dropped {} of {total} stations without coordinates or capacity",
            total - stations.len()
        );
    }

    stations
}
