//! Value parsing for station rows.
//!
//! Every parser returns `None` instead of failing, so a malformed cell
//! only blanks that field and never the whole table.

use std::sync::LazyLock;

use regex::Regex;

/// Bracket characters that may enclose a coordinate pair.
static BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[()\[\]]").expect("valid regex"));

/// Parses a trimmed decimal number. Non-finite values count as missing.
#[must_use]
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a docking capacity. Negative values are kept as published and
/// logged, only unparseable text counts as missing.
#[must_use]
pub fn parse_capacity(s: &str) -> Option<f64> {
    let capacity = parse_number(s)?;
    if capacity < 0.0 {
        log::warn!("Negative station capacity {capacity}");
    }
    Some(capacity)
}

/// Parses a combined `"lat, lon"` field into `(latitude, longitude)`.
///
/// Bracket characters are removed, then the text is split on the first
/// comma. Each half is parsed on its own, so `"48.85, abc"` still yields a
/// latitude. Text without a comma yields no longitude.
#[must_use]
pub fn parse_coordinates(s: &str) -> (Option<f64>, Option<f64>) {
    let stripped = BRACKETS_RE.replace_all(s, "");
    match stripped.split_once(',') {
        Some((lat, lon)) => (parse_number(lat), parse_number(lon)),
        None => (parse_number(&stripped), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pair(actual: (Option<f64>, Option<f64>), lat: f64, lon: f64) {
        let (la, lo) = actual;
        assert!((la.unwrap() - lat).abs() < f64::EPSILON);
        assert!((lo.unwrap() - lon).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_plain_pair() {
        assert_pair(parse_coordinates("48.8656, 2.2757"), 48.8656, 2.2757);
    }

    #[test]
    fn brackets_and_whitespace_do_not_change_result() {
        let core = parse_coordinates("48.8656,2.2757");
        for text in [
            "[48.8656, 2.2757]",
            "(48.8656,2.2757)",
            "  [ 48.8656 ,   2.2757 ]  ",
            "\t48.8656 , 2.2757\n",
        ] {
            assert_eq!(parse_coordinates(text), core, "input: {text:?}");
        }
    }

    #[test]
    fn splits_on_first_comma_only() {
        let (lat, lon) = parse_coordinates("48.1, 2.3, 7");
        assert!((lat.unwrap() - 48.1).abs() < f64::EPSILON);
        assert!(lon.is_none());
    }

    #[test]
    fn malformed_half_is_missing() {
        let (lat, lon) = parse_coordinates("48.85, abc");
        assert!(lat.is_some());
        assert!(lon.is_none());

        assert_eq!(parse_coordinates("not a coordinate"), (None, None));
        assert_eq!(parse_coordinates(""), (None, None));
    }

    #[test]
    fn missing_comma_yields_no_longitude() {
        let (lat, lon) = parse_coordinates("48.85");
        assert!(lat.is_some());
        assert!(lon.is_none());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(parse_number("NaN").is_none());
        assert!(parse_number("inf").is_none());
    }

    #[test]
    fn parses_capacity() {
        assert!((parse_capacity(" 35 ").unwrap() - 35.0).abs() < f64::EPSILON);
        assert!((parse_capacity("12.0").unwrap() - 12.0).abs() < f64::EPSILON);
        assert!((parse_capacity("-4").unwrap() + 4.0).abs() < f64::EPSILON);
        assert!(parse_capacity("trente").is_none());
        assert!(parse_capacity("").is_none());
    }
}
