#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone colors for charts and maps.
//!
//! Colors come from a fixed colorblind-safe qualitative palette and are
//! handed out by position in the label sequence, wrapping around once the
//! palette is exhausted. The mapping is recomputed from the labels every
//! time; there is no shared color state.

use std::collections::BTreeMap;

/// Qualitative "Safe" palette, in assignment order.
pub const PALETTE: &[&str] = &[
    "#88CCEE", "#CC6677", "#DDCC77", "#117733", "#332288", "#AA4499", "#44AA99", "#999933",
    "#882255", "#661100", "#888888",
];

/// Returns the palette color for the label at `index`.
#[must_use]
pub fn color_at(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Maps each label to a color by its position in `labels`.
///
/// The same ordered labels always produce the same mapping. If a label
/// appears more than once, its first position decides the color.
#[must_use]
pub fn assign_colors<S: AsRef<str>>(labels: &[S]) -> BTreeMap<String, &'static str> {
    let mut colors = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        colors
            .entry(label.as_ref().to_string())
            .or_insert_with(|| color_at(index));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_colors_by_position() {
        let colors = assign_colors(&["Paris - 1er arrondissement", "Montreuil", "Vincennes"]);
        assert_eq!(colors["Paris - 1er arrondissement"], "#88CCEE");
        assert_eq!(colors["Montreuil"], "#CC6677");
        assert_eq!(colors["Vincennes"], "#DDCC77");
    }

    #[test]
    fn cycles_through_palette() {
        let labels: Vec<String> = (0..=PALETTE.len()).map(|i| format!("zone {i}")).collect();
        let colors = assign_colors(&labels);
        assert_eq!(colors.len(), PALETTE.len() + 1);
        assert_eq!(colors[&labels[PALETTE.len()]], PALETTE[0]);
        assert_eq!(colors[&labels[PALETTE.len() - 1]], "#888888");
    }

    #[test]
    fn is_deterministic() {
        let labels = ["Saint-Ouen", "Clichy", "Pantin"];
        assert_eq!(assign_colors(&labels), assign_colors(&labels));
    }

    #[test]
    fn first_occurrence_decides_duplicate_color() {
        let colors = assign_colors(&["Clichy", "Pantin", "Clichy"]);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["Clichy"], PALETTE[0]);
    }

    #[test]
    fn empty_labels_yield_empty_mapping() {
        assert!(assign_colors::<&str>(&[]).is_empty());
    }
}
