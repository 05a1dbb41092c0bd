//! Canonical arrondissement labels.

use std::sync::LazyLock;

use regex::Regex;

/// First run of ASCII digits in a raw label.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// Formats a raw arrondissement label such as `"10ème Ardt"` as
/// `"Paris - 10e arrondissement"`.
///
/// Arrondissement 1 takes the `"er"` suffix, every other number `"e"`. Labels without
/// a number yield `None`. The number is kept as digits, so any length is accepted.
#[must_use]
pub fn format_arrondissement_label(raw: &str) -> Option<String> {
    let digits = NUMBER_RE.find(raw)?.as_str().trim_start_matches('0');
    let n = if digits.is_empty() { "0" } else { digits };
    let suffix = if n == "1" { "er" } else { "e" };
    Some(format!("Paris - {n}{suffix} arrondissement"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_first_arrondissement() {
        assert_eq!(
            format_arrondissement_label("1er Ardt").as_deref(),
            Some("Paris - 1er arrondissement")
        );
        assert_eq!(
            format_arrondissement_label("1").as_deref(),
            Some("Paris - 1er arrondissement")
        );
    }

    #[test]
    fn formats_other_arrondissements() {
        assert_eq!(
            format_arrondissement_label("10ème Ardt").as_deref(),
            Some("Paris - 10e arrondissement")
        );
        assert_eq!(
            format_arrondissement_label("Ardt 20").as_deref(),
            Some("Paris - 20e arrondissement")
        );
    }

    #[test]
    fn leading_zeros_are_ignored() {
        assert_eq!(
            format_arrondissement_label("01").as_deref(),
            Some("Paris - 1er arrondissement")
        );
    }

    #[test]
    fn numbers_beyond_u32_are_formatted() {
        assert_eq!(
            format_arrondissement_label("99999999999 Ardt").as_deref(),
            Some("Paris - 99999999999e arrondissement")
        );
        assert_eq!(
            format_arrondissement_label("0").as_deref(),
            Some("Paris - 0e arrondissement")
        );
    }

    #[test]
    fn labels_without_digits_are_missing() {
        assert_eq!(format_arrondissement_label("Louvre"), None);
        assert_eq!(format_arrondissement_label(""), None);
    }
}
