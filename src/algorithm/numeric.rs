//! Small numeric helpers shared by the analyses

/// Round to `places` decimals, halves rounding towards positive infinity
///
/// Rounding applies to the f64 product `value * 10^places`, so
/// `round_to(0.125, 2)` is `0.13` and `round_to(-2.5, 0)` is `-2.0`.
/// Values whose product overflows are returned unchanged.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    (scaled + 0.5).floor() / factor
}

/// Arithmetic mean; 0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with divisor `n - 1`; 0 when fewer than two values
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Population variance with divisor `n`; 0 for an empty slice
#[must_use]
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}
