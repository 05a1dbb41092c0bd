#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Station table loading and normalization.
//!
//! Reads the `;`-delimited station export, resolves its semantic columns
//! through a [`ColumnMapping`](velib_map_station_models::ColumnMapping),
//! and turns every row into a
//! [`NormalizedStation`](velib_map_station_models::NormalizedStation).
//! Unparseable values become missing fields; only structural problems
//! (unreadable file, undecodable bytes, missing header row) are errors.

pub mod columns;
pub mod normalize;
pub mod parsing;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use normalize::normalize_table;
pub use table::{RawTable, load_table, read_table};

/// Errors that can occur while loading the station table.
#[derive(Debug, Error)]
pub enum StationError {
    /// The station file could not be read.
    #[error("Failed to read station file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is neither UTF-8 with a byte-order mark nor plain UTF-8.
    #[error("Station file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table has no header row.
    #[error("Station table has no header row")]
    MissingHeader,
}
