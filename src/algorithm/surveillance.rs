//! Outbreak surveillance over weekly case counts per diagnosis
//!
//! For each diagnosis the first four weekly buckets form the baseline and
//! each of the last four buckets is checked against `baseline * multiplier`.
//! With fewer than eight buckets the two windows overlap. Weeks without any
//! visit have no bucket, so gaps are not counted as zero weeks.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithm::grouping::{PeriodKey, TimeUnit, group_by_diagnosis, group_by_time_period};
use crate::models::patient::PatientRecord;

/// Default multiplier applied to the baseline to obtain the alert threshold
pub const DEFAULT_THRESHOLD_MULTIPLIER: f64 = 2.0;
/// Weekly buckets used for the baseline and for the recent window
pub const BASELINE_WEEKS: usize = 4;

/// Actions attached to every outbreak alert
pub const OUTBREAK_RECOMMENDATIONS: [&str; 4] = [
    "Investigate potential outbreak source",
    "Enhance surveillance and case finding",
    "Review infection control measures",
    "Consider public health intervention",
];

/// Severity of an outbreak alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Above threshold
    Moderate,
    /// Above 1.5 times the threshold
    High,
    /// Above twice the threshold
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::Moderate => "moderate",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// One week in which a diagnosis exceeded its threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveillanceAlert {
    /// Severity
    pub alert_level: AlertLevel,
    /// Diagnosis the alert concerns
    pub diagnosis: String,
    /// Sunday starting the breaching week, `YYYY-MM-DD`
    pub week_start: String,
    /// Baseline times multiplier
    pub threshold: f64,
    /// Cases observed in the week
    pub observed_value: f64,
    /// Baseline weekly cases
    pub expected_value: f64,
    /// Alert text
    pub message: String,
    /// Suggested actions
    pub recommendations: Vec<String>,
}

/// Scan every diagnosis for weeks above `threshold_multiplier` times baseline
///
/// Alerts are ordered by diagnosis, then by week. Every breaching week yields
/// its own alert.
#[must_use]
pub fn detect_outbreak(records: &[PatientRecord], threshold_multiplier: f64) -> Vec<SurveillanceAlert> {
    let by_diagnosis: Vec<(&str, Vec<&PatientRecord>)> =
        group_by_diagnosis(records).into_iter().collect();

    by_diagnosis
        .par_iter()
        .map(|(diagnosis, diagnosis_records)| {
            let weekly = group_by_time_period(diagnosis_records.iter().copied(), TimeUnit::Weekly);
            let weeks: Vec<(PeriodKey, f64)> = weekly
                .into_iter()
                .map(|(key, count)| (key, count as f64))
                .collect();
            scan_weeks(diagnosis, &weeks, threshold_multiplier)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

fn scan_weeks(diagnosis: &str, weeks: &[(PeriodKey, f64)], multiplier: f64) -> Vec<SurveillanceAlert> {
    if weeks.len() < BASELINE_WEEKS {
        debug!(
            "Skipping {diagnosis}: {} weekly buckets, need {BASELINE_WEEKS}",
            weeks.len()
        );
        return Vec::new();
    }

    let baseline = weeks[..BASELINE_WEEKS].iter().map(|(_, c)| c).sum::<f64>() / BASELINE_WEEKS as f64;
    let threshold = baseline * multiplier;

    weeks[weeks.len() - BASELINE_WEEKS..]
        .iter()
        .filter(|(_, observed)| *observed > threshold)
        .map(|(week, observed)| SurveillanceAlert {
            alert_level: classify(*observed, threshold),
            diagnosis: diagnosis.to_string(),
            week_start: week.to_string(),
            threshold,
            observed_value: *observed,
            expected_value: baseline,
            message: format!("Unusual increase in {diagnosis} cases detected"),
            recommendations: OUTBREAK_RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

fn classify(observed: f64, threshold: f64) -> AlertLevel {
    if observed > threshold * 2.0 {
        AlertLevel::Critical
    } else if observed > threshold * 1.5 {
        AlertLevel::High
    } else {
        AlertLevel::Moderate
    }
}
