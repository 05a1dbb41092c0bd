//! Per-zone summaries and global capacity statistics.

use std::collections::BTreeMap;

use velib_map_analytics_models::{GlobalStats, QUANTILE_PROBABILITIES, Quantile, ZoneSummary};
use velib_map_station_models::Station;

use crate::stats::{median, quantile_sorted, sorted};

/// Groups the working set by zone.
///
/// Rows are ordered by descending `capacity_total`; equal totals keep
/// alphabetical zone order. An empty working set yields an empty table.
#[must_use]
pub fn summarize_by_zone(stations: &[Station]) -> Vec<ZoneSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for station in stations {
        groups
            .entry(station.zone.as_str())
            .or_default()
            .push(station.capacity);
    }

    let mut summaries: Vec<ZoneSummary> = groups
        .into_iter()
        .map(|(zone, capacities)| ZoneSummary {
            zone: zone.to_string(),
            station_count: capacities.len() as u64,
            capacity_total: capacities.iter().sum(),
            capacity_median: median(&capacities).unwrap_or_default(),
        })
        .collect();

    summaries.sort_by(|a, b| b.capacity_total.total_cmp(&a.capacity_total));

    log::debug!("Summarized {} stations into {} zones", stations.len(), summaries.len());

    summaries
}

/// Computes the station count and the capacity quantiles at
/// [`QUANTILE_PROBABILITIES`]. The quantile list is empty when there are
/// no stations.
#[must_use]
pub fn global_stats(stations: &[Station]) -> GlobalStats {
    let capacities: Vec<f64> = stations.iter().map(|s| s.capacity).collect();
    let sorted = sorted(&capacities);

    let quantiles = QUANTILE_PROBABILITIES
        .iter()
        .filter_map(|&probability| {
            quantile_sorted(&sorted, probability).map(|value| Quantile { probability, value })
        })
        .collect();

    GlobalStats {
        n: stations.len() as u64,
        quantiles,
    }
}
