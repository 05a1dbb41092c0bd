//! Figures derived for a user-selected subset of zones.
//!
//! The presentation layer passes a zone selection into data that is
//! already computed; nothing here re-runs the pipeline.

use std::collections::BTreeSet;

use velib_map_analytics_models::{AreaSplit, GlobalStats, NetworkOverview, ZoneSummary};
use velib_map_station_models::{Station, UNKNOWN_ZONE};

use crate::stats::{mean, median};

/// Probability whose quantile marks under-sized stations.
const LOW_CAPACITY_PROBABILITY: f64 = 0.1;

/// Keeps the stations whose zone is in `selection`. An empty selection
/// keeps every station.
#[must_use]
pub fn filter_by_zones(stations: &[Station], selection: &BTreeSet<String>) -> Vec<Station> {
    if selection.is_empty() {
        return stations.to_vec();
    }

    stations
        .iter()
        .filter(|s| selection.contains(&s.zone))
        .cloned()
        .collect()
}

/// Sorted distinct zones offered for selection, without the unknown zone.
#[must_use]
pub fn filter_options(stations: &[Station]) -> Vec<String> {
    stations
        .iter()
        .map(|s| s.zone.as_str())
        .filter(|zone| !zone.is_empty() && *zone != UNKNOWN_ZONE)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Computes the key figures of `stations`.
///
/// The low-capacity count compares against the global 10th percentile in
/// `stats`, so it stays meaningful for a filtered subset. It is zero when
/// no quantiles were computed.
#[must_use]
pub fn network_overview(stations: &[Station], stats: &GlobalStats) -> NetworkOverview {
    let capacities: Vec<f64> = stations.iter().map(|s| s.capacity).collect();

    let below_low_quantile = stats
        .quantile(LOW_CAPACITY_PROBABILITY)
        .map_or(0, |threshold| {
            capacities.iter().filter(|c| **c < threshold).count() as u64
        });

    NetworkOverview {
        station_count: stations.len() as u64,
        total_capacity: capacities.iter().sum(),
        mean_capacity: mean(&capacities),
        median_capacity: median(&capacities),
        below_low_quantile,
    }
}

/// Zone with the highest total capacity.
#[must_use]
pub fn top_zone(summaries: &[ZoneSummary]) -> Option<&ZoneSummary> {
    summaries
        .iter()
        .reduce(|best, s| if s.capacity_total > best.capacity_total { s } else { best })
}

/// Splits station counts between Paris and its suburbs by zone label.
#[must_use]
pub fn paris_split(stations: &[Station]) -> AreaSplit {
    let paris = stations.iter().filter(|s| s.zone.contains("Paris")).count() as u64;
    AreaSplit {
        paris,
        suburbs: stations.len() as u64 - paris,
    }
}
