//! Order statistics.
//!
//! Quantiles use linear interpolation between the two closest order
//! statistics: for `n` sorted values the position is `(n - 1) * p`, and a
//! fractional position blends its neighbours. The median is the 0.5
//! quantile, so an even count averages the two middle values.

/// Returns `values` sorted ascending.
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolated quantile of already sorted values.
///
/// Returns `None` for an empty slice or a probability outside `[0, 1]`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_sorted(sorted: &[f64], probability: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&probability) {
        return None;
    }

    let position = (sorted.len() - 1) as f64 * probability;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - position.floor();

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Linear-interpolated quantile of unsorted values.
#[must_use]
pub fn quantile(values: &[f64], probability: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), probability)
}

/// Median of unsorted values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Arithmetic mean.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
