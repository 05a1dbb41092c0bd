#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone assignment for stations.
//!
//! Every station is matched against two polygon layers: Paris
//! arrondissements and the surrounding communes. An arrondissement match
//! always wins over a commune match; stations matching neither get
//! [`UNKNOWN_ZONE`](velib_map_station_models::UNKNOWN_ZONE).

pub mod assign;
pub mod label;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use velib_map_spatial::SpatialError;

pub use assign::{AssignmentStats, ZoneAssigner, resolve_zone};
pub use label::format_arrondissement_label;

/// Which polygon layer a zone comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneLayerKind {
    /// Paris arrondissements.
    Arrondissement,
    /// Communes around Paris.
    Commune,
}

impl std::fmt::Display for ZoneLayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arrondissement => write!(f, "arrondissements"),
            Self::Commune => write!(f, "communes"),
        }
    }
}

/// Location of a polygon layer file and the property holding its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSource {
    /// `GeoJSON` file path.
    pub path: PathBuf,
    /// Property name holding the raw zone label.
    pub label_field: String,
}

/// Errors that can occur while preparing zone layers. All of them are
/// structural: the reference data is unusable and the run cannot proceed.
#[derive(Debug, Error)]
pub enum ZoneError {
    /// A layer could not be loaded or reprojected.
    #[error("Failed to load {layer} layer: {source}")]
    Layer {
        /// Layer being loaded.
        layer: ZoneLayerKind,
        /// Underlying spatial error.
        #[source]
        source: SpatialError,
    },

    /// The layer has no feature carrying the label field.
    #[error("The {layer} layer must contain the '{field}' field")]
    MissingLabelField {
        /// Layer being loaded.
        layer: ZoneLayerKind,
        /// Required property name.
        field: String,
    },
}
