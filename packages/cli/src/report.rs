//! Plain-text rendering of pipeline output.

use std::collections::BTreeSet;

use velib_map_analytics::{filter_by_zones, network_overview, paris_split, top_zone};
use velib_map_analytics_models::ZoneSummary;
use velib_map_palette::assign_colors;
use velib_map_pipeline::PipelineOutput;

/// Renders key figures, quantiles and the zone table for the selected
/// zones. An empty selection covers the whole network.
pub fn render_summary(output: &PipelineOutput, selection: &BTreeSet<String>) -> String {
    let stations = filter_by_zones(&output.stations, selection);
    let overview = network_overview(&stations, &output.stats);
    let split = paris_split(&stations);
    let rows: Vec<&ZoneSummary> = output
        .by_zone
        .iter()
        .filter(|row| selection.is_empty() || selection.contains(&row.zone))
        .collect();

    let mut lines = vec![
        format!("Stations:          {}", overview.station_count),
        format!("Total capacity:    {:.0}", overview.total_capacity),
        format!("Mean capacity:     {}", fmt_optional(overview.mean_capacity)),
        format!("Median capacity:   {}", fmt_optional(overview.median_capacity)),
        format!("Below 10th pct:    {}", overview.below_low_quantile),
        format!("Paris / suburbs:   {} / {}", split.paris, split.suburbs),
    ];

    if let Some(top) = top_zone(&output.by_zone)
        .filter(|top| selection.is_empty() || selection.contains(&top.zone))
    {
        lines.push(format!(
            "Top zone:          {} ({:.0} docks)",
            top.zone, top.capacity_total
        ));
    }

    lines.push(String::new());
    lines.push(format!("Capacity quantiles (n = {})", output.stats.n));
    if output.stats.quantiles.is_empty() {
        lines.push("  (none)".to_string());
    }
    for q in &output.stats.quantiles {
        lines.push(format!("  q{:<4.0} {:.1}", q.probability * 100.0, q.value));
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<40} {:>8} {:>10} {:>8}",
        "ZONE", "STATIONS", "CAPACITY", "MEDIAN"
    ));
    lines.push("-".repeat(69));
    for row in rows {
        lines.push(format!(
            "{:<40} {:>8} {:>10.0} {:>8.1}",
            row.zone, row.station_count, row.capacity_total, row.capacity_median
        ));
    }

    lines.join("\n") + "\n"
}

/// Renders every zone of the summary table with its palette color, in
/// table order.
pub fn render_zones(output: &PipelineOutput) -> String {
    let labels: Vec<&str> = output.by_zone.iter().map(|row| row.zone.as_str()).collect();
    let colors = assign_colors(&labels);

    labels
        .iter()
        .map(|label| format!("{}  {label}\n", colors[*label]))
        .collect()
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

#[cfg(test)]
mod tests {
    use velib_map_analytics::{global_stats, summarize_by_zone};
    use velib_map_station_models::Station;

    use super::*;

    fn station(zone: &str, capacity: f64) -> Station {
        Station {
            id: None,
            name: None,
            capacity,
            latitude: 48.86,
            longitude: 2.34,
            zone: zone.to_string(),
        }
    }

    fn output() -> PipelineOutput {
        let stations = vec![
            station("Paris - 1er arrondissement", 20.0),
            station("Paris - 1er arrondissement", 40.0),
            station("Montreuil", 30.0),
        ];
        PipelineOutput {
            by_zone: summarize_by_zone(&stations),
            stats: global_stats(&stations),
            stations,
        }
    }

    #[test]
    fn summary_covers_whole_network_without_selection() {
        let text = render_summary(&output(), &BTreeSet::new());
        assert!(text.contains("Stations:          3"));
        assert!(text.contains("Paris / suburbs:   2 / 1"));
        assert!(text.contains("Top zone:          Paris - 1er arrondissement (60 docks)"));
        assert!(text.contains("Montreuil"));
    }

    #[test]
    fn summary_restricts_to_selection() {
        let selection = BTreeSet::from(["Montreuil".to_string()]);
        let text = render_summary(&output(), &selection);
        assert!(text.contains("Stations:          1"));
        assert!(!text.contains("Paris - 1er arrondissement"));
    }

    #[test]
    fn summary_of_empty_output() {
        let text = render_summary(&PipelineOutput::default(), &BTreeSet::new());
        assert!(text.contains("Mean capacity:     -"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn zones_are_listed_with_colors_in_table_order() {
        let text = render_zones(&output());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#88CCEE  Paris - 1er arrondissement");
        assert_eq!(lines[1], "#CC6677  Montreuil");
    }
}
