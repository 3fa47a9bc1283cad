//! Trend and seasonality analysis over time-bucketed case counts
//!
//! Counts are bucketed by [`TimeUnit`], then an ordinary least-squares line
//! is fitted over the bucket index. The reported `confidence` is the absolute
//! slope, a relative magnitude that is not a probability.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithm::grouping::{TimeUnit, bucket_series, group_by_time_period};
use crate::algorithm::numeric::{mean, population_variance, round_to};
use crate::models::patient::PatientRecord;

/// Slope magnitude above which a series is no longer considered stable
pub const TREND_SLOPE_THRESHOLD: f64 = 0.1;
/// Autocorrelation magnitude above which a monthly series is seasonal
pub const SEASONALITY_THRESHOLD: f64 = 0.3;
/// Minimum number of monthly buckets before seasonality is evaluated
pub const MIN_SEASONAL_POINTS: usize = 12;

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Slope above the threshold
    Increasing,
    /// Slope below the negative threshold
    Decreasing,
    /// Slope within the threshold band
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Count for one time bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCount {
    /// Bucket label, e.g. `2024-03`
    pub period: String,
    /// Records in the bucket
    pub count: usize,
}

/// Result of a trend analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Direction of the fitted line
    pub trend: TrendDirection,
    /// Change from the first to the last bucket, in percent
    pub percent_change: f64,
    /// Whether a yearly pattern was detected
    pub seasonal_pattern: bool,
    /// Absolute slope of the fitted line
    pub confidence: f64,
    /// Bucketed counts the trend was fitted on
    pub series: Vec<PeriodCount>,
}

impl TrendAnalysis {
    fn stable(series: Vec<PeriodCount>) -> Self {
        Self {
            trend: TrendDirection::Stable,
            percent_change: 0.0,
            seasonal_pattern: false,
            confidence: 0.0,
            series,
        }
    }
}

/// Analyse the trend of case counts per `unit`
#[must_use]
pub fn analyze_trend(records: &[PatientRecord], unit: TimeUnit) -> TrendAnalysis {
    let grouped = group_by_time_period(records, unit);
    let series: Vec<PeriodCount> = grouped
        .iter()
        .map(|(key, &count)| PeriodCount {
            period: key.to_string(),
            count,
        })
        .collect();
    let values = bucket_series(&grouped);
    debug!("Trend analysis over {} {unit} buckets", values.len());

    if values.len() < 2 {
        return TrendAnalysis::stable(series);
    }

    let slope = least_squares_slope(&values);
    let trend = if slope > TREND_SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -TREND_SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let first = values[0];
    let last = values[values.len() - 1];
    let percent_change = if first > 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    let seasonal_pattern = unit == TimeUnit::Monthly && detect_seasonality(&values);

    TrendAnalysis {
        trend,
        percent_change: round_to(percent_change, 2),
        seasonal_pattern,
        confidence: round_to(slope.abs(), 2),
        series,
    }
}

/// OLS slope of `values` against their index
#[must_use]
pub fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let (numerator, denominator) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(num, den), (i, &y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        },
    );
    numerator / denominator
}

/// Lag autocorrelation test for a yearly pattern in monthly counts
///
/// Uses lag `min(12, n / 2)` so that series between one and two years long
/// are compared against their own second half. A flat series is never seasonal.
#[must_use]
pub fn detect_seasonality(values: &[f64]) -> bool {
    let n = values.len();
    if n < MIN_SEASONAL_POINTS {
        return false;
    }

    let m = mean(values);
    let variance = population_variance(values);
    if variance == 0.0 {
        return false;
    }

    let lag = 12.min(n / 2);
    let covariance: f64 = (0..n - lag)
        .map(|i| (values[i] - m) * (values[i + lag] - m))
        .sum();
    let correlation = covariance / ((n - lag) as f64 * variance);

    correlation.abs() > SEASONALITY_THRESHOLD
}
