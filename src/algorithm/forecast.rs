//! Moving-average forecast of monthly case counts
//!
//! The forecast cascades: each predicted month is appended (unrounded) to the
//! working series before the next month is averaged, so from the second step
//! on the window mixes history with earlier predictions. This is not a
//! fixed-window average over history alone.

use log::debug;

use crate::algorithm::grouping::{TimeUnit, bucket_series, group_by_time_period};
use crate::algorithm::numeric::{mean, round_to};
use crate::models::patient::PatientRecord;

/// Default number of months to forecast
pub const DEFAULT_FORECAST_PERIODS: usize = 6;
/// Months of history required before forecasting
pub const MIN_HISTORY_MONTHS: usize = 3;
/// Largest moving-average window
pub const MAX_WINDOW: usize = 3;

/// Forecast `periods` months of case counts
///
/// With fewer than three months of history the forecast is all zeros.
#[must_use]
pub fn forecast_cases(records: &[PatientRecord], periods: usize) -> Vec<u64> {
    let history = bucket_series(&group_by_time_period(records, TimeUnit::Monthly));
    debug!("Forecasting {periods} months from {} months of history", history.len());

    if history.len() < MIN_HISTORY_MONTHS {
        return vec![0; periods];
    }
    cascading_moving_average(history, periods)
        .into_iter()
        .map(|value| round_to(value, 0) as u64)
        .collect()
}

/// Unrounded cascading moving-average forecast of `series`
#[must_use]
pub fn cascading_moving_average(mut series: Vec<f64>, periods: usize) -> Vec<f64> {
    let window = MAX_WINDOW.min(series.len());
    if window == 0 {
        return vec![0.0; periods];
    }

    let mut forecast = Vec::with_capacity(periods);
    for _ in 0..periods {
        let average = mean(&series[series.len() - window..]);
        forecast.push(average);
        // The prediction feeds the next step's window
        series.push(average);
    }
    forecast
}
