//! Engine-authored interpretation and recommendations
//!
//! Used whenever no narrator is configured or the narrator fails.

use itertools::Itertools;

use crate::algorithm::TrendDirection;
use crate::models::patient::{NumericField, PatientRecord};
use crate::models::results::AnalysisResults;

/// Interpretation text and recommendations for a result
///
/// `records` are the records the result was computed from; descriptive text
/// opens with their count and number of distinct diagnoses.
#[must_use]
pub fn interpret(results: &AnalysisResults, records: &[PatientRecord]) -> (String, Vec<String>) {
    match results {
        AnalysisResults::Descriptive { field, stats } => match stats {
            Some(stats) => (
                format!(
                    "{} The average patient {field} is {} {} with a standard deviation of {}.",
                    record_summary(records),
                    stats.mean,
                    field.unit(),
                    stats.std_dev
                ),
                match field {
                    NumericField::Age => owned(&[
                        "Consider age-specific interventions",
                        "Monitor age-related disease patterns",
                    ]),
                    _ => vec![
                        format!("Review departments with the highest {field}"),
                        format!("Track {field} against service standards"),
                    ],
                },
            ),
            None => (
                format!(
                    "{} No valid {field} values were found in the selected records.",
                    record_summary(records)
                ),
                vec![format!("Check data quality for the {field} column")],
            ),
        },
        AnalysisResults::Trend(trend) => (
            format!(
                "The data shows a {} trend with {}% change.",
                trend.trend, trend.percent_change
            ),
            if trend.trend == TrendDirection::Increasing {
                owned(&["Monitor the increasing trend", "Prepare for increased service demand"])
            } else {
                owned(&["Investigate causes of decline", "Maintain current interventions"])
            },
        ),
        AnalysisResults::Epidemiological(metrics) => (
            format!(
                "The incidence rate is {} per 1000 population with a case fatality rate of {}%.",
                metrics.incidence, metrics.case_fatality_rate
            ),
            owned(&[
                "Strengthen prevention measures",
                "Improve case management",
                "Enhance surveillance",
            ]),
        ),
        AnalysisResults::Statistical(test) => (
            format!(
                "{}: statistic {}, p = {}. {}.",
                test.test, test.statistic, test.p_value, test.interpretation
            ),
            if test.is_significant {
                owned(&[
                    "Investigate factors behind the group difference",
                    "Confirm the finding on an independent sample",
                ])
            } else {
                owned(&["Continue monitoring both groups"])
            },
        ),
        AnalysisResults::Surveillance(alerts) => match alerts.first() {
            Some(first) => (
                format!(
                    "{} potential outbreak(s) detected requiring immediate attention.",
                    alerts.len()
                ),
                first.recommendations.clone(),
            ),
            None => (
                "No unusual patterns detected. Current situation is stable.".to_string(),
                owned(&["Continue routine surveillance", "Maintain current prevention measures"]),
            ),
        },
        AnalysisResults::Forecasting { periods, forecast } => (
            format!(
                "Projected monthly cases for the next {periods} months: {}.",
                forecast.iter().join(", ")
            ),
            owned(&[
                "Plan staffing and supplies against the projected caseload",
                "Update the forecast as new months are recorded",
            ]),
        ),
    }
}

/// "Found N total records with M different diagnoses." Blank diagnoses are not counted.
fn record_summary(records: &[PatientRecord]) -> String {
    let diagnoses = records
        .iter()
        .map(|record| record.diagnosis.as_str())
        .filter(|diagnosis| !diagnosis.is_empty())
        .unique()
        .count();
    format!(
        "Found {} total records with {diagnoses} different diagnoses.",
        records.len()
    )
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
