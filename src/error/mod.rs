//! Error handling for the analytics engine.

use std::io;

/// Specialized error type for analytics operations
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Not enough usable data to answer the request
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A parameter was outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A record could not be adapted into a `PatientRecord`
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// The narrative collaborator failed
    #[error("Narrative error: {0}")]
    Narrative(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    /// Create an insufficient data error
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a malformed record error
    pub fn malformed_record(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
