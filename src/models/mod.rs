//! Domain models for hospital analytics
//!
//! This module contains the visit record model, the adapter that turns
//! loosely typed uploaded rows into records, and the analytics result
//! envelope.

pub mod adapter;
pub mod patient;
pub mod results;

// Re-export commonly used types
pub use adapter::{record_from_value, records_from_json};
pub use patient::{NumericField, PatientRecord, Sex};
pub use results::{AnalysisResults, AnalysisType, AnalyticsResult};
