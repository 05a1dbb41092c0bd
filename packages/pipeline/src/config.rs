//! Pipeline configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration pointing at the standard data directory:
//!
//! ```toml
//! stations = "velib-emplacement-des-stations.csv"
//! delimiter = ";"
//!
//! [arrondissements]
//! path = "arrondissements.geojson"
//! label_field = "l_ar"
//!
//! [communes]
//! path = "communes-version-simplifiee.geojson"
//! label_field = "nom"
//! ```
//!
//! Layer tables may set only one of their keys; the other keeps its
//! default. Relative paths in a configuration file are resolved against
//! the directory containing that file. An optional `[columns]` table replaces
//! the built-in column rules.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use velib_map_station_models::ColumnMapping;
use velib_map_zone::LayerSource;

use crate::PipelineError;
use crate::paths;

/// Label property of the arrondissement layer.
pub const ARRONDISSEMENT_LABEL_FIELD: &str = "l_ar";

/// Label property of the commune layer.
pub const COMMUNE_LABEL_FIELD: &str = "nom";

/// Inputs and parsing options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Station export path.
    #[serde(default = "paths::stations_path")]
    pub stations: PathBuf,
    /// Field separator of the station export.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Arrondissement polygon layer.
    #[serde(
        default = "default_arrondissements",
        deserialize_with = "deserialize_arrondissements"
    )]
    pub arrondissements: LayerSource,
    /// Commune polygon layer.
    #[serde(default = "default_communes", deserialize_with = "deserialize_communes")]
    pub communes: LayerSource,
    /// Column rules overriding the built-in ones.
    #[serde(default)]
    pub columns: Option<ColumnMapping>,
}

const fn default_delimiter() -> char {
    ';'
}

fn default_arrondissements() -> LayerSource {
    LayerSource {
        path: paths::arrondissements_path(),
        label_field: ARRONDISSEMENT_LABEL_FIELD.to_string(),
    }
}

fn default_communes() -> LayerSource {
    LayerSource {
        path: paths::communes_path(),
        label_field: COMMUNE_LABEL_FIELD.to_string(),
    }
}

/// A layer table in which every key is optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerTable {
    path: Option<PathBuf>,
    label_field: Option<String>,
}

impl LayerTable {
    fn or(self, default: LayerSource) -> LayerSource {
        LayerSource {
            path: self.path.unwrap_or(default.path),
            label_field: self.label_field.unwrap_or(default.label_field),
        }
    }
}

fn deserialize_arrondissements<'de, D>(deserializer: D) -> Result<LayerSource, D::Error>
where
    D: Deserializer<'de>,
{
    LayerTable::deserialize(deserializer).map(|table| table.or(default_arrondissements()))
}

fn deserialize_communes<'de, D>(deserializer: D) -> Result<LayerSource, D::Error>
where
    D: Deserializer<'de>,
{
    LayerTable::deserialize(deserializer).map(|table| table.or(default_communes()))
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stations: paths::stations_path(),
            delimiter: default_delimiter(),
            arrondissements: default_arrondissements(),
            communes: default_communes(),
            columns: None,
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from TOML text. Relative paths are kept
    /// as written.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the TOML is malformed or the
    /// delimiter is not a single ASCII character.
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::de::from_str(toml_str).map_err(|e| PipelineError::Config {
            message: e.to_string(),
        })?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// Reads a configuration file, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be read, or any
    /// error from [`Self::from_toml`].
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml(&toml_str)?;
        if let Some(base) = path.parent() {
            config.stations = base.join(&config.stations);
            config.arrondissements.path = base.join(&config.arrondissements.path);
            config.communes.path = base.join(&config.communes.path);
        }

        log::debug!("Loaded pipeline configuration from {}", path.display());

        Ok(config)
    }

    /// Returns the delimiter as a CSV byte.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the delimiter is not ASCII.
    pub fn delimiter_byte(&self) -> Result<u8, PipelineError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| PipelineError::Config {
                message: format!("delimiter {:?} must be a single ASCII character", self.delimiter),
            })
    }

    /// The three input files, in cache-key order.
    #[must_use]
    pub fn input_paths(&self) -> [&Path; 3] {
        [
            &self.stations,
            &self.arrondissements.path,
            &self.communes.path,
        ]
    }
}
