//! Column resolution for tables whose headers are not fixed.
//!
//! Headers are compared after Unicode compatibility decomposition with
//! combining marks removed and lower-casing, so `"Capacité de la station"`
//! normalizes to `"capacite de la station"`. A keyword first has to match
//! a whole whitespace-separated token; only when no header matches that
//! way is a plain substring match attempted.

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;
use velib_map_station_models::{ColumnMapping, ColumnRule};

/// Embedded default column rules.
const DEFAULT_MAPPING_TOML: &str = include_str!("../columns.toml");

/// Returns the built-in column rules for the public station export.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a failure is a development error caught by the tests.
#[must_use]
pub fn default_mapping() -> ColumnMapping {
    toml::de::from_str(DEFAULT_MAPPING_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded column mapping: {e}"))
}

/// Strips diacritics and lower-cases a header.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Finds the first header matching any of `keywords`.
///
/// Headers are scanned in table order. A whole-token match on any header
/// beats a substring match on an earlier one. Empty keywords are ignored.
#[must_use]
pub fn find_column<S: AsRef<str>>(headers: &[String], keywords: &[S]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| !k.is_empty())
        .collect();

    normalized
        .iter()
        .position(|header| {
            header
                .split_whitespace()
                .any(|token| keywords.contains(&token))
        })
        .or_else(|| {
            normalized
                .iter()
                .position(|header| keywords.iter().any(|k| header.contains(*k)))
        })
}

/// Resolves one rule to a column index.
///
/// Falls back to the rule's default header by exact name. Returns `None`
/// when the default does not exist either; callers treat that column as
/// entirely unknown.
#[must_use]
pub fn resolve_column(headers: &[String], rule: &ColumnRule) -> Option<usize> {
    find_column(headers, &rule.keywords).or_else(|| headers.iter().position(|h| *h == rule.default))
}

/// Column indices for every semantic field, resolved once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedColumns {
    /// Identifier column.
    pub id: Option<usize>,
    /// Name column.
    pub name: Option<usize>,
    /// Capacity column.
    pub capacity: Option<usize>,
    /// Combined coordinate column.
    pub coordinates: Option<usize>,
}

impl ResolvedColumns {
    /// Resolves all fields of `mapping` against `headers`.
    #[must_use]
    pub fn resolve(headers: &[String], mapping: &ColumnMapping) -> Self {
        let resolved = Self {
            id: resolve_column(headers, &mapping.id),
            name: resolve_column(headers, &mapping.name),
            capacity: resolve_column(headers, &mapping.capacity),
            coordinates: resolve_column(headers, &mapping.coordinates),
        };

        for (field, index) in [
            ("id", resolved.id),
            ("name", resolved.name),
            ("capacity", resolved.capacity),
            ("coordinates", resolved.coordinates),
        ] {
            match index {
                Some(i) => log::debug!("Column '{field}' resolved to header '{}'", headers[i]),
                None => log::warn!("Column '{field}' not found; all values treated as unknown"),
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn default_mapping_parses() {
        let mapping = default_mapping();
        assert_eq!(mapping.id.keywords, vec!["identifiant", "id"]);
        assert_eq!(mapping.coordinates.default, "Coordonnées géographiques");
    }

    #[test]
    fn strips_diacritics_and_lowercases() {
        assert_eq!(
            normalize_header("Coordonnées Géographiques"),
            "coordonnees geographiques"
        );
        assert_eq!(normalize_header("Capacité"), "capacite");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn matches_whole_token() {
        let h = headers(&["Nom de la station", "Identifiant station"]);
        assert_eq!(find_column(&h, &["identifiant", "id"]), Some(1));
    }

    #[test]
    fn token_match_beats_earlier_substring_match() {
        let h = headers(&["Validity", "Station id"]);
        assert_eq!(find_column(&h, &["id"]), Some(1));
    }

    #[test]
    fn falls_back_to_substring_match() {
        let h = headers(&["Station opening hours", "Coordonnées géographiques"]);
        assert_eq!(find_column(&h, &["coord", "geograph"]), Some(1));
    }

    #[test]
    fn first_encountered_column_wins_ties() {
        let h = headers(&["Nom court", "Nom de la station"]);
        assert_eq!(find_column(&h, &["nom"]), Some(0));
    }

    #[test]
    fn empty_header_never_matches() {
        let h = headers(&["", "capacity"]);
        assert_eq!(find_column(&h, &["capacity"]), Some(1));
        assert_eq!(find_column(&h, &[""]), None);
    }

    #[test]
    fn unmatched_rule_falls_back_to_default_header() {
        let rule = ColumnRule {
            keywords: vec!["identifiant".to_string()],
            default: "station_code".to_string(),
        };
        assert_eq!(resolve_column(&headers(&["x", "station_code"]), &rule), Some(1));
        assert_eq!(resolve_column(&headers(&["x", "y"]), &rule), None);
    }

    #[test]
    fn resolves_public_export_headers() {
        let h = headers(&[
            "Identifiant station",
            "Nom de la station",
            "Capacité de la station",
            "Coordonnées géographiques",
            "Station opening hours",
        ]);
        let cols = ResolvedColumns::resolve(&h, &default_mapping());
        assert_eq!(
            cols,
            ResolvedColumns {
                id: Some(0),
                name: Some(1),
                capacity: Some(2),
                coordinates: Some(3),
            }
        );
    }
}
