//! Configuration for the analytics engine.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::algorithm::epidemiology::{
    DEFAULT_POPULATION, DEFAULT_TIME_PERIOD_DAYS, EpidemiologyParams,
};
use crate::algorithm::forecast::DEFAULT_FORECAST_PERIODS;
use crate::algorithm::grouping::TimeUnit;
use crate::algorithm::hypothesis::TestType;
use crate::algorithm::surveillance::DEFAULT_THRESHOLD_MULTIPLIER;
use crate::error::{AnalyticsError, Result};
use crate::models::patient::NumericField;

/// Configuration for the `AnalyticsEngine`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Reference population for incidence and prevalence
    pub population: u64,
    /// Incidence window in days
    pub time_period_days: i64,
    /// All-cause case count for the proportional morbidity ratio
    pub all_cause_cases: Option<u64>,
    /// Bucket size for trend analysis
    pub trend_unit: TimeUnit,
    /// Baseline multiplier for outbreak thresholds
    pub threshold_multiplier: f64,
    /// Months to forecast
    pub forecast_periods: usize,
    /// Field summarised by descriptive analysis
    pub descriptive_field: NumericField,
    /// Field compared by statistical analysis
    pub comparison_field: NumericField,
    /// Test used by statistical analysis
    pub test_type: TestType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            time_period_days: DEFAULT_TIME_PERIOD_DAYS,
            all_cause_cases: None,
            trend_unit: TimeUnit::Monthly,
            threshold_multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            forecast_periods: DEFAULT_FORECAST_PERIODS,
            descriptive_field: NumericField::Age,
            comparison_field: NumericField::Age,
            test_type: TestType::TTest,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AnalyticsError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            AnalyticsError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Set the reference population
    #[must_use]
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    /// Set the incidence window
    #[must_use]
    pub fn with_time_period_days(mut self, days: i64) -> Self {
        self.time_period_days = days;
        self
    }

    /// Set the all-cause case count
    #[must_use]
    pub fn with_all_cause_cases(mut self, cases: u64) -> Self {
        self.all_cause_cases = Some(cases);
        self
    }

    /// Set the trend bucket size
    #[must_use]
    pub fn with_trend_unit(mut self, unit: TimeUnit) -> Self {
        self.trend_unit = unit;
        self
    }

    /// Set the outbreak threshold multiplier
    #[must_use]
    pub fn with_threshold_multiplier(mut self, multiplier: f64) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    /// Set the number of months to forecast
    #[must_use]
    pub fn with_forecast_periods(mut self, periods: usize) -> Self {
        self.forecast_periods = periods;
        self
    }

    /// Set the field used by descriptive analysis
    #[must_use]
    pub fn with_descriptive_field(mut self, field: NumericField) -> Self {
        self.descriptive_field = field;
        self
    }

    /// Set the field and test used by statistical analysis
    #[must_use]
    pub fn with_comparison(mut self, field: NumericField, test_type: TestType) -> Self {
        self.comparison_field = field;
        self.test_type = test_type;
        self
    }

    /// Epidemiology inputs derived from this configuration
    #[must_use]
    pub fn epidemiology_params(&self) -> EpidemiologyParams {
        EpidemiologyParams {
            population: self.population,
            time_period_days: self.time_period_days,
            all_cause_cases: self.all_cause_cases,
        }
    }

    /// Check that every setting is within range
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(AnalyticsError::Config(
                "population must be greater than zero".to_string(),
            ));
        }
        if self.time_period_days < 0 {
            return Err(AnalyticsError::Config(
                "timePeriodDays must not be negative".to_string(),
            ));
        }
        if !self.threshold_multiplier.is_finite() || self.threshold_multiplier <= 0.0 {
            return Err(AnalyticsError::Config(format!(
                "thresholdMultiplier must be a positive number, got {}",
                self.threshold_multiplier
            )));
        }
        Ok(())
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(f, "  Population: {}", self.population)?;
        writeln!(f, "  Incidence Window: {} days", self.time_period_days)?;
        if let Some(all_cause) = self.all_cause_cases {
            writeln!(f, "  All-Cause Cases: {all_cause}")?;
        }
        writeln!(f, "  Trend Unit: {}", self.trend_unit)?;
        writeln!(f, "  Threshold Multiplier: {}", self.threshold_multiplier)?;
        writeln!(f, "  Forecast Periods: {}", self.forecast_periods)?;
        writeln!(f, "  Descriptive Field: {}", self.descriptive_field)?;
        writeln!(
            f,
            "  Comparison: {} on {}",
            self.test_type, self.comparison_field
        )?;
        Ok(())
    }
}
