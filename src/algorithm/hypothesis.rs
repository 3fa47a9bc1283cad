//! Two-group hypothesis tests
//!
//! All p-values come from normal approximations (see
//! [`crate::algorithm::distribution`]). The t-test in particular does not use
//! a t-distribution, so small samples report p-values that are too small.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algorithm::distribution::{chi_square_cdf, two_tailed_p_value};
use crate::algorithm::numeric::{mean, round_to, sample_variance};
use crate::error::{AnalyticsError, Result};
use crate::models::patient::{NumericField, OUTCOME_VOCABULARY, PatientRecord, numeric_values};

/// p-value below which a result is reported as significant
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Two-sided 95% normal quantile
const Z_95: f64 = 1.96;

/// Available hypothesis tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestType {
    /// Independent two-sample t-test with Welch standard error
    #[default]
    #[serde(rename = "t-test")]
    TTest,
    /// Mann-Whitney U rank test
    #[serde(rename = "mann-whitney")]
    MannWhitney,
    /// Pearson chi-square over encounter outcomes
    #[serde(rename = "chi-square")]
    ChiSquare,
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestType::TTest => "t-test",
            TestType::MannWhitney => "mann-whitney",
            TestType::ChiSquare => "chi-square",
        };
        f.write_str(label)
    }
}

impl FromStr for TestType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "t-test" | "ttest" | "t" => Ok(TestType::TTest),
            "mann-whitney" | "mannwhitney" | "u" => Ok(TestType::MannWhitney),
            "chi-square" | "chisquare" | "chi2" => Ok(TestType::ChiSquare),
            other => Err(AnalyticsError::invalid_parameter(format!(
                "Unknown test type: {other}"
            ))),
        }
    }
}

/// Outcome of a hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalTestResult {
    /// Human-readable test name
    pub test: String,
    /// Test statistic, rounded to 3 decimals
    pub statistic: f64,
    /// Approximate p-value, rounded to 3 decimals
    pub p_value: f64,
    /// 95% interval for the mean difference; `[0, 0]` where not applicable
    pub confidence_interval: (f64, f64),
    /// Degrees of freedom, for the chi-square test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_of_freedom: Option<u32>,
    /// Plain-language verdict
    pub interpretation: String,
    /// Whether the unrounded p-value is below 0.05
    pub is_significant: bool,
}

/// Compare `field` between two record groups
///
/// Fails with `InsufficientData` if either group has no usable values for
/// `field`, including for the chi-square test, which itself only looks at
/// outcomes.
pub fn perform_statistical_test(
    group1: &[PatientRecord],
    group2: &[PatientRecord],
    field: NumericField,
    test_type: TestType,
) -> Result<StatisticalTestResult> {
    let values1 = numeric_values(group1, field);
    let values2 = numeric_values(group2, field);

    if values1.is_empty() || values2.is_empty() {
        return Err(AnalyticsError::insufficient_data(format!(
            "both groups need at least one {field} value (got {} and {})",
            values1.len(),
            values2.len()
        )));
    }

    let result = match test_type {
        TestType::TTest => t_test(&values1, &values2),
        TestType::MannWhitney => mann_whitney_u_test(&values1, &values2),
        TestType::ChiSquare => chi_square_test(group1, group2),
    };
    Ok(result)
}

/// Welch-style two-sample t-test with a normal-approximation p-value
///
/// A zero standard error yields a statistic of 0 (p = 1) when the means are
/// equal and `f64::MAX` carrying the sign of the difference (p = 0) when they
/// differ, so the result stays finite.
#[must_use]
pub fn t_test(values1: &[f64], values2: &[f64]) -> StatisticalTestResult {
    let n1 = values1.len() as f64;
    let n2 = values2.len() as f64;
    let mean_diff = mean(values1) - mean(values2);

    let std_error = (sample_variance(values1) / n1 + sample_variance(values2) / n2).sqrt();

    let (statistic, p_value) = if std_error > 0.0 {
        let t = mean_diff / std_error;
        (t, two_tailed_p_value(t))
    } else if mean_diff == 0.0 {
        (0.0, 1.0)
    } else {
        (f64::MAX.copysign(mean_diff), 0.0)
    };

    let is_significant = p_value < SIGNIFICANCE_LEVEL;
    StatisticalTestResult {
        test: "Independent t-test".to_string(),
        statistic: round_to(statistic, 3),
        p_value: round_to(p_value, 3),
        confidence_interval: (
            round_to(mean_diff - Z_95 * std_error, 3),
            round_to(mean_diff + Z_95 * std_error, 3),
        ),
        degrees_of_freedom: None,
        interpretation: difference_verdict(is_significant),
        is_significant,
    }
}

/// Mann-Whitney U test with a normal-approximation p-value
///
/// Ranks are positions in the stably sorted combined sample; tied values
/// are not given averaged ranks.
#[must_use]
pub fn mann_whitney_u_test(values1: &[f64], values2: &[f64]) -> StatisticalTestResult {
    let (rank1, rank2) = values1
        .iter()
        .map(|&v| (v, true))
        .chain(values2.iter().map(|&v| (v, false)))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .enumerate()
        .fold((0.0, 0.0), |(r1, r2), (index, (_, first))| {
            let rank = (index + 1) as f64;
            if first { (r1 + rank, r2) } else { (r1, r2 + rank) }
        });

    let n1 = values1.len() as f64;
    let n2 = values2.len() as f64;
    let u1 = rank1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = rank2 - n2 * (n2 + 1.0) / 2.0;
    let u = u1.min(u2);

    let expected_u = n1 * n2 / 2.0;
    let std_u = (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();
    let z = (u - expected_u) / std_u;
    let p_value = two_tailed_p_value(z);

    let is_significant = p_value < SIGNIFICANCE_LEVEL;
    StatisticalTestResult {
        test: "Mann-Whitney U test".to_string(),
        statistic: round_to(u, 3),
        p_value: round_to(p_value, 3),
        confidence_interval: (0.0, 0.0),
        degrees_of_freedom: None,
        interpretation: difference_verdict(is_significant),
        is_significant,
    }
}

/// Pearson chi-square test of outcome distribution between two groups
///
/// Outcomes outside the fixed vocabulary are ignored. Cells with an
/// expected count of zero contribute nothing.
#[must_use]
pub fn chi_square_test(group1: &[PatientRecord], group2: &[PatientRecord]) -> StatisticalTestResult {
    let observed1 = outcome_counts(group1);
    let observed2 = outcome_counts(group2);

    let row1: f64 = observed1.iter().sum();
    let row2: f64 = observed2.iter().sum();
    let total = row1 + row2;

    let mut chi_square = 0.0;
    if total > 0.0 {
        for (o1, o2) in observed1.iter().zip(&observed2) {
            let column = o1 + o2;
            let expected1 = row1 * column / total;
            let expected2 = row2 * column / total;
            if expected1 > 0.0 {
                chi_square += (o1 - expected1).powi(2) / expected1;
            }
            if expected2 > 0.0 {
                chi_square += (o2 - expected2).powi(2) / expected2;
            }
        }
    }

    let df = (OUTCOME_VOCABULARY.len() as u32 - 1) * (2 - 1);
    let p_value = 1.0 - chi_square_cdf(chi_square, df);

    let is_significant = p_value < SIGNIFICANCE_LEVEL;
    StatisticalTestResult {
        test: "Chi-square test".to_string(),
        statistic: round_to(chi_square, 3),
        p_value: round_to(p_value, 3),
        confidence_interval: (0.0, 0.0),
        degrees_of_freedom: Some(df),
        interpretation: if is_significant {
            "Significant association detected".to_string()
        } else {
            "No significant association".to_string()
        },
        is_significant,
    }
}

fn outcome_counts(records: &[PatientRecord]) -> Vec<f64> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records {
        *counts.entry(record.outcome.as_str()).or_insert(0) += 1;
    }
    OUTCOME_VOCABULARY
        .iter()
        .map(|outcome| counts.get(outcome).copied().unwrap_or(0) as f64)
        .collect()
}

fn difference_verdict(is_significant: bool) -> String {
    if is_significant {
        "Significant difference detected".to_string()
    } else {
        "No significant difference".to_string()
    }
}
