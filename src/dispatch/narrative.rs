//! Seam for an optional narrative collaborator
//!
//! A narrator turns numeric results into prose, typically by calling a
//! hosted language model. The engine's results stand on their own, so the
//! dispatcher treats any narrator failure as "no narrative".

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::results::{AnalysisResults, AnalysisType};

/// What the narrator is asked to describe
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest<'a> {
    /// The user's query
    pub query: &'a str,
    /// Dataset analysed
    pub dataset_id: &'a str,
    /// Selected analysis type
    pub analysis_type: AnalysisType,
    /// Number of records analysed
    pub record_count: usize,
    /// Engine output
    pub results: &'a AnalysisResults,
}

/// Prose produced by a narrator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    /// Main reading of the results
    pub analysis: String,
    /// Additional observations
    #[serde(default)]
    pub insights: Vec<String>,
    /// Suggested actions
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A collaborator that narrates analysis results
pub trait Narrator: Send + Sync {
    /// Describe `request`; errors are reported as `AnalyticsError::Narrative`
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Result<Narrative>;
}
