#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Station record types and the column mapping schema.
//!
//! The public station dataset does not publish stable column names, so
//! every semantic field is described by a [`ColumnRule`] (keywords plus a
//! fallback header). Rows are normalized into [`NormalizedStation`] values
//! and, once validated, into [`Station`] values that make up the working
//! set used for aggregation.

use serde::{Deserialize, Serialize};

/// Zone label assigned to stations that match no polygon.
pub const UNKNOWN_ZONE: &str = "(Unknown)";

/// How to locate one semantic column in a table with unknown headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Keywords matched against normalized headers, first as whole tokens
    /// and then as substrings.
    pub keywords: Vec<String>,
    /// Header name used when no keyword matches. It may not exist in the
    /// table, in which case every value of the field is unknown.
    pub default: String,
}

/// Column rules for every semantic field of a station row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Station identifier.
    pub id: ColumnRule,
    /// Station display name.
    pub name: ColumnRule,
    /// Docking capacity.
    pub capacity: ColumnRule,
    /// Combined `"lat, lon"` coordinate text.
    pub coordinates: ColumnRule,
}

/// A station row after column resolution and value parsing.
///
/// Any field may be missing. Stations lacking coordinates or capacity are
/// kept here but never reach the working set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStation {
    /// Opaque identifier, not guaranteed unique.
    pub id: Option<String>,
    /// Display label.
    pub name: Option<String>,
    /// Docking capacity, `None` when unparseable.
    pub capacity: Option<f64>,
    /// WGS84 latitude in degrees.
    pub latitude: Option<f64>,
    /// WGS84 longitude in degrees.
    pub longitude: Option<f64>,
    /// Resolved zone label, [`UNKNOWN_ZONE`] until assigned.
    pub zone: String,
}

impl NormalizedStation {
    /// Returns `(longitude, latitude)` when both coordinates are present.
    #[must_use]
    pub const fn lon_lat(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }

    /// Converts into a working-set [`Station`], or `None` when latitude,
    /// longitude or capacity is missing.
    #[must_use]
    pub fn into_station(self) -> Option<Station> {
        Some(Station {
            id: self.id,
            name: self.name,
            capacity: self.capacity?,
            latitude: self.latitude?,
            longitude: self.longitude?,
            zone: self.zone,
        })
    }
}

/// A validated station of the working set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Station {
    /// Opaque identifier.
    pub id: Option<String>,
    /// Display label.
    pub name: Option<String>,
    /// Docking capacity.
    pub capacity: f64,
    /// WGS84 latitude in degrees.
    pub latitude: f64,
    /// WGS84 longitude in degrees.
    pub longitude: f64,
    /// Arrondissement or commune label, or [`UNKNOWN_ZONE`].
    pub zone: String,
}
