//! Configured entry point to the analytics algorithms
//!
//! `AnalyticsEngine` holds only its validated configuration. It never stores
//! records, so one engine can serve any number of concurrent callers.

use log::debug;

use crate::algorithm::{
    DescriptiveStats, EpidemiologicalMetrics, StatisticalTestResult, SurveillanceAlert,
    TrendAnalysis, analyze_trend, calculate_descriptive_stats, calculate_epidemiological_metrics,
    detect_outbreak, forecast_cases, perform_statistical_test,
};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::patient::{PatientRecord, Sex};
use crate::models::results::{AnalysisResults, AnalysisType};

/// Stateless analytics engine
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    /// Create an engine after validating its configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Descriptive statistics of the configured field
    #[must_use]
    pub fn descriptive(&self, records: &[PatientRecord]) -> Option<DescriptiveStats> {
        calculate_descriptive_stats(records, self.config.descriptive_field)
    }

    /// Epidemiological rates with the configured population and window
    pub fn epidemiological(&self, records: &[PatientRecord]) -> Result<EpidemiologicalMetrics> {
        calculate_epidemiological_metrics(records, &self.config.epidemiology_params())
    }

    /// Trend over the configured time unit
    #[must_use]
    pub fn trend(&self, records: &[PatientRecord]) -> TrendAnalysis {
        analyze_trend(records, self.config.trend_unit)
    }

    /// Compare two groups with the configured field and test
    pub fn compare(
        &self,
        group1: &[PatientRecord],
        group2: &[PatientRecord],
    ) -> Result<StatisticalTestResult> {
        perform_statistical_test(
            group1,
            group2,
            self.config.comparison_field,
            self.config.test_type,
        )
    }

    /// Outbreak alerts with the configured threshold multiplier
    #[must_use]
    pub fn surveillance(&self, records: &[PatientRecord]) -> Vec<SurveillanceAlert> {
        detect_outbreak(records, self.config.threshold_multiplier)
    }

    /// Forecast of the configured number of months
    #[must_use]
    pub fn forecast(&self, records: &[PatientRecord]) -> Vec<u64> {
        forecast_cases(records, self.config.forecast_periods)
    }

    /// Run one analysis type over `records`
    ///
    /// Statistical analysis compares female against male records.
    pub fn run(&self, analysis_type: AnalysisType, records: &[PatientRecord]) -> Result<AnalysisResults> {
        debug!("Running {analysis_type} analysis over {} records", records.len());
        let results = match analysis_type {
            AnalysisType::Descriptive => AnalysisResults::Descriptive {
                field: self.config.descriptive_field,
                stats: self.descriptive(records),
            },
            AnalysisType::Trend => AnalysisResults::Trend(self.trend(records)),
            AnalysisType::Epidemiological => {
                AnalysisResults::Epidemiological(self.epidemiological(records)?)
            }
            AnalysisType::Statistical => {
                let (female, male) = split_by_sex(records);
                AnalysisResults::Statistical(self.compare(&female, &male)?)
            }
            AnalysisType::Surveillance => AnalysisResults::Surveillance(self.surveillance(records)),
            AnalysisType::Forecasting => AnalysisResults::Forecasting {
                periods: self.config.forecast_periods,
                forecast: self.forecast(records),
            },
        };
        Ok(results)
    }
}

/// Split records into (female, male) groups, preserving order
#[must_use]
pub fn split_by_sex(records: &[PatientRecord]) -> (Vec<PatientRecord>, Vec<PatientRecord>) {
    records
        .iter()
        .cloned()
        .partition(|record| record.sex == Sex::Female)
}
