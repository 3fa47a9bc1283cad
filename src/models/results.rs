//! Analytics result envelope
//!
//! `AnalysisResults` is a tagged union with one variant per analysis type.
//! It serialises as `{"analysisType": ..., "results": ...}` and is flattened
//! into the `AnalyticsResult` envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algorithm::{
    DescriptiveStats, EpidemiologicalMetrics, StatisticalTestResult, SurveillanceAlert,
    TrendAnalysis,
};
use crate::error::AnalyticsError;
use crate::models::patient::NumericField;

/// Analysis categories the engine covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Summary statistics of a numeric field
    Descriptive,
    /// Case counts over time
    Trend,
    /// Incidence, prevalence and fatality rates
    Epidemiological,
    /// Two-group hypothesis test
    Statistical,
    /// Outbreak alerts
    Surveillance,
    /// Monthly case forecast
    Forecasting,
}

impl AnalysisType {
    /// All analysis types
    pub const ALL: [AnalysisType; 6] = [
        AnalysisType::Descriptive,
        AnalysisType::Trend,
        AnalysisType::Epidemiological,
        AnalysisType::Statistical,
        AnalysisType::Surveillance,
        AnalysisType::Forecasting,
    ];

    /// Lowercase name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisType::Descriptive => "descriptive",
            AnalysisType::Trend => "trend",
            AnalysisType::Epidemiological => "epidemiological",
            AnalysisType::Statistical => "statistical",
            AnalysisType::Surveillance => "surveillance",
            AnalysisType::Forecasting => "forecasting",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        AnalysisType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| AnalyticsError::invalid_parameter(format!("Unknown analysis type: {s}")))
    }
}

/// Typed analysis output, one variant per analysis type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysisType", content = "results", rename_all = "lowercase")]
pub enum AnalysisResults {
    /// Summary of one numeric field; `stats` is `None` without usable values
    Descriptive {
        /// Field summarised
        field: NumericField,
        /// Summary, if any values were usable
        stats: Option<DescriptiveStats>,
    },
    /// Trend of case counts
    Trend(TrendAnalysis),
    /// Epidemiological rates
    Epidemiological(EpidemiologicalMetrics),
    /// Hypothesis test between two groups
    Statistical(StatisticalTestResult),
    /// Outbreak alerts, possibly empty
    Surveillance(Vec<SurveillanceAlert>),
    /// Monthly case forecast
    Forecasting {
        /// Months forecast
        periods: usize,
        /// Predicted cases per month
        forecast: Vec<u64>,
    },
}

impl AnalysisResults {
    /// Analysis type of this result
    #[must_use]
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            AnalysisResults::Descriptive { .. } => AnalysisType::Descriptive,
            AnalysisResults::Trend(_) => AnalysisType::Trend,
            AnalysisResults::Epidemiological(_) => AnalysisType::Epidemiological,
            AnalysisResults::Statistical(_) => AnalysisType::Statistical,
            AnalysisResults::Surveillance(_) => AnalysisType::Surveillance,
            AnalysisResults::Forecasting { .. } => AnalysisType::Forecasting,
        }
    }
}

/// Result of one analytics query, ready to persist or display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    /// Dataset analysed
    pub dataset_id: String,
    /// Query text that selected the analysis
    pub query: String,
    /// Typed results
    #[serde(flatten)]
    pub results: AnalysisResults,
    /// Plain-language reading of the results
    pub interpretation: String,
    /// Suggested follow-up actions
    pub recommendations: Vec<String>,
    /// Additional narrative observations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    /// Whether the text came from the narrative collaborator
    pub narrated: bool,
    /// Number of records analysed
    pub record_count: usize,
    /// Generation time
    pub generated_at: DateTime<Utc>,
    /// Issuing user
    pub generated_by: String,
}

impl AnalyticsResult {
    /// Analysis type of the contained results
    #[must_use]
    pub fn analysis_type(&self) -> AnalysisType {
        self.results.analysis_type()
    }
}
