//! Time bucketing and grouping helpers
//!
//! This module groups visit records into calendar periods (daily, weekly,
//! monthly, yearly) and by diagnosis. Buckets only exist for periods that
//! contain at least one record, and are always iterated chronologically.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyticsError;
use crate::models::patient::PatientRecord;

/// Granularity used when bucketing records over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One bucket per calendar day
    Daily,
    /// One bucket per week, weeks starting on Sunday
    Weekly,
    /// One bucket per calendar month
    #[default]
    Monthly,
    /// One bucket per calendar year
    Yearly,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Daily => "daily",
            TimeUnit::Weekly => "weekly",
            TimeUnit::Monthly => "monthly",
            TimeUnit::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeUnit {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(TimeUnit::Daily),
            "weekly" | "week" => Ok(TimeUnit::Weekly),
            "monthly" | "month" => Ok(TimeUnit::Monthly),
            "yearly" | "year" => Ok(TimeUnit::Yearly),
            other => Err(AnalyticsError::invalid_parameter(format!(
                "Unknown time unit: {other}"
            ))),
        }
    }
}

/// Key identifying one time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    /// A single day
    Day(NaiveDate),
    /// A week, identified by its Sunday
    Week(NaiveDate),
    /// A calendar month
    Month(i32, u32), // year, month
    /// A calendar year
    Year(i32),
}

impl PeriodKey {
    /// Bucket key for a date at the given granularity
    #[must_use]
    pub fn from_date(date: NaiveDate, unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Daily => PeriodKey::Day(date),
            TimeUnit::Weekly => PeriodKey::Week(week_start(date)),
            TimeUnit::Monthly => PeriodKey::Month(date.year(), date.month()),
            TimeUnit::Yearly => PeriodKey::Year(date.year()),
        }
    }

    /// First day covered by this bucket
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) => Some(*date),
            PeriodKey::Month(year, month) => NaiveDate::from_ymd_opt(*year, *month, 1),
            PeriodKey::Year(year) => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PeriodKey::Month(year, month) => write!(f, "{year}-{month:02}"),
            PeriodKey::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Sunday on or before `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - TimeDelta::days(i64::from(offset))
}

/// Count records per time bucket
///
/// Accepts owned slices (`&[PatientRecord]`) and borrowed groups
/// (`Vec<&PatientRecord>` via `.iter().copied()`) alike.
#[must_use]
pub fn group_by_time_period<'a>(
    records: impl IntoIterator<Item = &'a PatientRecord>,
    unit: TimeUnit,
) -> BTreeMap<PeriodKey, usize> {
    let mut grouped = BTreeMap::new();
    for record in records {
        *grouped
            .entry(PeriodKey::from_date(record.visit_date, unit))
            .or_insert(0) += 1;
    }
    grouped
}

/// Bucket counts in chronological order, as `f64` for numeric work
#[must_use]
pub fn bucket_series(grouped: &BTreeMap<PeriodKey, usize>) -> Vec<f64> {
    grouped.values().map(|&count| count as f64).collect()
}

/// Group records by their diagnosis text, ordered by diagnosis
#[must_use]
pub fn group_by_diagnosis(records: &[PatientRecord]) -> BTreeMap<&str, Vec<&PatientRecord>> {
    let mut grouped: BTreeMap<&str, Vec<&PatientRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.diagnosis.as_str())
            .or_default()
            .push(record);
    }
    grouped
}
