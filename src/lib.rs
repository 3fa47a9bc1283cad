//! A Rust library for descriptive, epidemiological, trend, surveillance and
//! forecasting analytics over hospital visit records.

pub mod algorithm;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::EngineConfig;
pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, Result};
pub use models::{
    AnalysisResults, AnalysisType, AnalyticsResult, NumericField, PatientRecord, Sex,
    records_from_json,
};

// Algorithms
pub use algorithm::{
    AlertLevel, DescriptiveStats, EpidemiologicalMetrics, StatisticalTestResult,
    SurveillanceAlert, TestType, TimeUnit, TrendAnalysis, TrendDirection,
};

// Query dispatch
pub use dispatch::{AnalysisRequest, Dispatcher, Narrative, NarrativeRequest, Narrator, classify_query};

// Utilities
pub use utils::SyntheticDataGenerator;
