//! Descriptive statistics over a numeric record field

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::numeric::{mean, round_to, sample_variance};
use crate::models::patient::{NumericField, PatientRecord, numeric_values};

/// Summary of a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// Number of usable values
    pub count: usize,
    /// Mean, rounded to 2 decimals
    pub mean: f64,
    /// Median, rounded to 2 decimals
    pub median: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Sample standard deviation, rounded to 2 decimals
    pub std_dev: f64,
    /// Value at index `floor(n * 0.25)` of the sorted sample
    pub q1: f64,
    /// Value at index `floor(n * 0.75)` of the sorted sample
    pub q3: f64,
}

/// Summarise `field` across `records`
///
/// Records without a usable value for the field are skipped. Returns `None`
/// when no usable values remain. A single value has a standard deviation of 0.
#[must_use]
pub fn calculate_descriptive_stats(
    records: &[PatientRecord],
    field: NumericField,
) -> Option<DescriptiveStats> {
    let values = numeric_values(records, field);
    debug!(
        "Descriptive stats for {field}: {} of {} records usable",
        values.len(),
        records.len()
    );
    describe(&values)
}

/// Summarise a raw sample
#[must_use]
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    // Index-based quartiles, no interpolation
    let q1 = sorted[n / 4];
    let q3 = sorted[(n * 3) / 4];

    Some(DescriptiveStats {
        count: n,
        mean: round_to(mean(values), 2),
        median: round_to(median, 2),
        min: sorted[0],
        max: sorted[n - 1],
        std_dev: round_to(sample_variance(values).sqrt(), 2),
        q1,
        q3,
    })
}
