//! Epidemiological rates: incidence, prevalence, case fatality and
//! proportional morbidity.

use serde::{Deserialize, Serialize};

use crate::algorithm::numeric::round_to;
use crate::error::{AnalyticsError, Result};
use crate::models::patient::PatientRecord;

/// Default reference population
pub const DEFAULT_POPULATION: u64 = 10_000;
/// Default incidence window in days
pub const DEFAULT_TIME_PERIOD_DAYS: i64 = 365;

/// Inputs that are not derivable from the records themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpidemiologyParams {
    /// Size of the population the records are drawn from
    pub population: u64,
    /// Incidence window, counted from the earliest visit (inclusive)
    pub time_period_days: i64,
    /// Cases of all causes in the same population, for the morbidity ratio
    pub all_cause_cases: Option<u64>,
}

impl Default for EpidemiologyParams {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            time_period_days: DEFAULT_TIME_PERIOD_DAYS,
            all_cause_cases: None,
        }
    }
}

/// Epidemiological summary of a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpidemiologicalMetrics {
    /// New cases per 1000 population within the window
    pub incidence: f64,
    /// All cases per 1000 population
    pub prevalence: f64,
    /// Percentage of cases that died
    pub case_fatality_rate: f64,
    /// Cases as a percentage of all-cause cases; absent without an all-cause count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proportional_morbidity_ratio: Option<f64>,
    /// Number of records
    pub total_cases: usize,
    /// Records inside the incidence window
    pub new_cases: usize,
    /// Records with outcome "Died"
    pub deaths: usize,
}

/// Compute incidence, prevalence, case fatality and morbidity ratio
pub fn calculate_epidemiological_metrics(
    records: &[PatientRecord],
    params: &EpidemiologyParams,
) -> Result<EpidemiologicalMetrics> {
    if params.population == 0 {
        return Err(AnalyticsError::invalid_parameter(
            "population must be greater than zero",
        ));
    }

    let total_cases = records.len();
    let deaths = records.iter().filter(|r| r.died()).count();

    let new_cases = match records.iter().map(|r| r.visit_date).min() {
        Some(earliest) => records
            .iter()
            .filter(|r| (r.visit_date - earliest).num_days() <= params.time_period_days)
            .count(),
        None => 0,
    };

    let population = params.population as f64;
    let incidence = new_cases as f64 / population * 1000.0;
    let prevalence = total_cases as f64 / population * 1000.0;
    let case_fatality_rate = if total_cases > 0 {
        deaths as f64 / total_cases as f64 * 100.0
    } else {
        0.0
    };
    let proportional_morbidity_ratio = params
        .all_cause_cases
        .filter(|&all| all > 0)
        .map(|all| round_to(total_cases as f64 / all as f64 * 100.0, 2));

    Ok(EpidemiologicalMetrics {
        incidence: round_to(incidence, 2),
        prevalence: round_to(prevalence, 2),
        case_fatality_rate: round_to(case_fatality_rate, 2),
        proportional_morbidity_ratio,
        total_cases,
        new_cases,
        deaths,
    })
}
