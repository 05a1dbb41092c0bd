#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Capacity aggregation result types.
//!
//! These are the structures handed to the presentation layer: one
//! [`ZoneSummary`] per zone, [`GlobalStats`] over the whole working set,
//! and the derived figures shown on the overview pages.

use serde::{Deserialize, Serialize};

/// Probabilities reported in [`GlobalStats::quantiles`].
pub const QUANTILE_PROBABILITIES: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

/// Capacity statistics for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ZoneSummary {
    /// Zone label.
    pub zone: String,
    /// Number of stations in the zone.
    pub station_count: u64,
    /// Sum of station capacities.
    pub capacity_total: f64,
    /// Median station capacity.
    pub capacity_median: f64,
}

impl ZoneSummary {
    /// Column names of the summary table, in display order.
    pub const COLUMNS: [&'static str; 4] =
        ["zone", "station_count", "capacity_total", "capacity_median"];
}

/// A capacity value at a given probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantile {
    /// Probability in `[0, 1]`.
    pub probability: f64,
    /// Capacity at that probability.
    pub value: f64,
}

/// Statistics over the whole working set.
///
/// The probability to capacity mapping is serialized as an ordered list
/// of `{"probability": p, "value": v}` entries rather than an object, so
/// probabilities stay numbers and keep their order:
///
/// ```json
/// { "n": 2, "quantiles": [{ "probability": 0.1, "value": 21.0 }, ...] }
/// ```
///
/// Use [`GlobalStats::quantile`] for lookups by probability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Number of working-set stations.
    pub n: u64,
    /// Capacity quantiles in increasing probability order. Empty when the
    /// working set is empty.
    pub quantiles: Vec<Quantile>,
}

impl GlobalStats {
    /// Returns the capacity at `probability`, if it was computed.
    #[must_use]
    pub fn quantile(&self, probability: f64) -> Option<f64> {
        self.quantiles
            .iter()
            .find(|q| (q.probability - probability).abs() < 1e-9)
            .map(|q| q.value)
    }
}

/// Key figures of a (possibly filtered) set of stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NetworkOverview {
    /// Number of stations.
    pub station_count: u64,
    /// Sum of capacities.
    pub total_capacity: f64,
    /// Mean capacity, `None` for an empty set.
    pub mean_capacity: Option<f64>,
    /// Median capacity, `None` for an empty set.
    pub median_capacity: Option<f64>,
    /// Stations strictly below the global 10th percentile.
    pub below_low_quantile: u64,
}

/// Station counts inside Paris versus the surrounding communes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSplit {
    /// Stations whose zone label mentions Paris.
    pub paris: u64,
    /// All other stations.
    pub suburbs: u64,
}
