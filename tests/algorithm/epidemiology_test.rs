//! Tests for epidemiological metrics

use chrono::TimeDelta;
use hospital_analytics::algorithm::epidemiology::{EpidemiologyParams, calculate_epidemiological_metrics};
use hospital_analytics::{AnalyticsError, PatientRecord};

use crate::utils::{on, visit};

fn spaced(count: usize, deaths: usize, spacing_days: i64) -> Vec<PatientRecord> {
    (0..count)
        .map(|i| {
            let outcome = if i < deaths { "Died" } else { "Discharged" };
            visit(format!("e{i}"), on(2024, 1, 1) + TimeDelta::days(i as i64 * spacing_days), "Cholera")
                .with_outcome(outcome)
        })
        .collect()
}

fn params(population: u64) -> EpidemiologyParams {
    EpidemiologyParams {
        population,
        ..EpidemiologyParams::default()
    }
}

#[test]
fn test_rates_per_thousand() {
    let metrics = calculate_epidemiological_metrics(&spaced(10, 2, 30), &params(1000)).unwrap();
    assert_eq!(metrics.total_cases, 10);
    assert_eq!(metrics.new_cases, 10);
    assert_eq!(metrics.deaths, 2);
    assert_eq!(metrics.incidence, 10.0);
    assert_eq!(metrics.prevalence, 10.0);
    assert_eq!(metrics.case_fatality_rate, 20.0);
    assert_eq!(metrics.proportional_morbidity_ratio, None);
}

#[test]
fn test_incidence_window() {
    // Visits on days 0, 100, ..., 900; days 0 to 300 fall inside 365
    let metrics = calculate_epidemiological_metrics(&spaced(10, 0, 100), &params(1000)).unwrap();
    assert_eq!(metrics.new_cases, 4);
    assert_eq!(metrics.incidence, 4.0);
    assert_eq!(metrics.prevalence, 10.0);
}

#[test]
fn test_window_boundary_is_inclusive() {
    let records = vec![
        visit("a", on(2023, 1, 1), "Cholera"),
        visit("b", on(2024, 1, 1), "Cholera"),
        visit("c", on(2024, 1, 2), "Cholera"),
    ];
    let metrics = calculate_epidemiological_metrics(&records, &params(1000)).unwrap();
    assert_eq!(metrics.new_cases, 2);
}

#[test]
fn test_proportional_morbidity_ratio() {
    let params = EpidemiologyParams {
        population: 1000,
        all_cause_cases: Some(40),
        ..EpidemiologyParams::default()
    };
    let metrics = calculate_epidemiological_metrics(&spaced(10, 0, 1), &params).unwrap();
    assert_eq!(metrics.proportional_morbidity_ratio, Some(25.0));
}

#[test]
fn test_empty_records() {
    let metrics = calculate_epidemiological_metrics(&[], &params(1000)).unwrap();
    assert_eq!(metrics.incidence, 0.0);
    assert_eq!(metrics.prevalence, 0.0);
    assert_eq!(metrics.case_fatality_rate, 0.0);
}

#[test]
fn test_zero_population_rejected() {
    let result = calculate_epidemiological_metrics(&spaced(3, 0, 1), &params(0));
    assert!(matches!(result, Err(AnalyticsError::InvalidParameter(_))));
}
