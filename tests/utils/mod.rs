//! Shared record fixtures for the integration tests

use chrono::NaiveDate;
use hospital_analytics::{PatientRecord, Sex};

/// Build a date, panicking on invalid input
#[must_use]
pub fn on(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A single visit with a diagnosis
#[must_use]
pub fn visit(id: impl Into<String>, date: NaiveDate, diagnosis: &str) -> PatientRecord {
    PatientRecord::new(id, "test-dataset", Sex::Female, date).with_diagnosis(diagnosis)
}

/// Records of one sex with the given ages, all on the same day
#[must_use]
pub fn with_ages(sex: Sex, ages: &[i32]) -> Vec<PatientRecord> {
    ages.iter()
        .enumerate()
        .map(|(i, &age)| {
            PatientRecord::new(format!("{sex:?}-{i}"), "test-dataset", sex, on(2024, 6, 1))
                .with_age(age)
        })
        .collect()
}

/// Records of one sex with the given outcome
#[must_use]
pub fn with_outcome(sex: Sex, outcome: &str, count: usize) -> Vec<PatientRecord> {
    (0..count)
        .map(|i| {
            PatientRecord::new(format!("{outcome}-{i}"), "test-dataset", sex, on(2024, 6, 1))
                .with_age(40)
                .with_outcome(outcome)
        })
        .collect()
}

/// `counts[i]` visits in month `i` starting January 2022, mid-month
#[must_use]
pub fn monthly_counts(counts: &[usize]) -> Vec<PatientRecord> {
    let mut records = Vec::new();
    for (i, &count) in counts.iter().enumerate() {
        let date = on(2022 + (i / 12) as i32, (i % 12) as u32 + 1, 15);
        for j in 0..count {
            records.push(visit(format!("m{i}-{j}"), date, "Malaria"));
        }
    }
    records
}

/// `counts[i]` visits of `diagnosis` on the i-th Sunday from 7 January 2024
#[must_use]
pub fn weekly_counts(diagnosis: &str, counts: &[usize]) -> Vec<PatientRecord> {
    let first_sunday = on(2024, 1, 7);
    let mut records = Vec::new();
    for (week, &count) in counts.iter().enumerate() {
        let date = first_sunday + chrono::TimeDelta::weeks(week as i64);
        for j in 0..count {
            records.push(visit(format!("{diagnosis}-w{week}-{j}"), date, diagnosis));
        }
    }
    records
}
