//! Query dispatch for the analytics dashboard
//!
//! This module maps free-text queries to an analysis type, runs the engine,
//! and wraps the typed result with interpretation text. It includes:
//!
//! 1. Keyword classification of queries
//! 2. Engine-authored interpretation and recommendations
//! 3. An optional narrative collaborator that may replace that text

pub mod interpretation;
pub mod narrative;

use chrono::Utc;
use log::{info, warn};

use crate::engine::AnalyticsEngine;
use crate::error::Result;
use crate::models::patient::PatientRecord;
use crate::models::results::{AnalysisType, AnalyticsResult};

pub use interpretation::interpret;
pub use narrative::{Narrative, NarrativeRequest, Narrator};

/// Keywords checked in order; the first matching group wins
const KEYWORDS: [(AnalysisType, &[&str]); 5] = [
    (AnalysisType::Trend, &["trend", "pattern", "over time"]),
    (AnalysisType::Epidemiological, &["incidence", "prevalence", "rate"]),
    (AnalysisType::Surveillance, &["outbreak", "alert", "abnormal"]),
    (AnalysisType::Statistical, &["compare", "difference", "test"]),
    (AnalysisType::Forecasting, &["forecast", "predict", "future"]),
];

/// Pick the analysis type for a free-text query
///
/// Matching is by lowercase substring, so "generate" matches "rate".
/// Queries matching nothing are descriptive.
#[must_use]
pub fn classify_query(query: &str) -> AnalysisType {
    let lower = query.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lower.contains(word)))
        .map_or(AnalysisType::Descriptive, |(analysis_type, _)| *analysis_type)
}

/// One analytics query against a dataset
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Dataset the records belong to
    pub dataset_id: String,
    /// Free-text query
    pub query: String,
    /// Issuing user
    pub requested_by: String,
    /// Explicit analysis type; classified from the query when `None`
    pub analysis_type: Option<AnalysisType>,
}

impl AnalysisRequest {
    /// Create a request whose analysis type is classified from `query`
    #[must_use]
    pub fn new(dataset_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            query: query.into(),
            requested_by: "system".to_string(),
            analysis_type: None,
        }
    }

    /// Set the issuing user
    #[must_use]
    pub fn requested_by(mut self, user: impl Into<String>) -> Self {
        self.requested_by = user.into();
        self
    }

    /// Force an analysis type instead of classifying the query
    #[must_use]
    pub fn with_analysis_type(mut self, analysis_type: AnalysisType) -> Self {
        self.analysis_type = Some(analysis_type);
        self
    }

    /// Analysis type this request resolves to
    #[must_use]
    pub fn resolved_type(&self) -> AnalysisType {
        self.analysis_type
            .unwrap_or_else(|| classify_query(&self.query))
    }
}

/// Runs requests through the engine and an optional narrator
pub struct Dispatcher {
    engine: AnalyticsEngine,
    narrator: Option<Box<dyn Narrator>>,
}

impl Dispatcher {
    /// Create a dispatcher without a narrator
    #[must_use]
    pub fn new(engine: AnalyticsEngine) -> Self {
        Self {
            engine,
            narrator: None,
        }
    }

    /// Attach a narrative collaborator
    #[must_use]
    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Engine used for analyses
    #[must_use]
    pub fn engine(&self) -> &AnalyticsEngine {
        &self.engine
    }

    /// Analyse `records` for `request`
    ///
    /// Engine failures (such as an empty comparison group) are returned as
    /// errors. Narrator failures are logged and the engine-authored text is
    /// used instead.
    pub fn analyze(&self, request: &AnalysisRequest, records: &[PatientRecord]) -> Result<AnalyticsResult> {
        let analysis_type = request.resolved_type();
        info!(
            "Query {:?} on dataset {} classified as {analysis_type}",
            request.query, request.dataset_id
        );

        let results = self.engine.run(analysis_type, records)?;
        let (mut interpretation, mut recommendations) = interpret(&results, records);
        let mut insights = Vec::new();
        let mut narrated = false;

        if let Some(narrator) = &self.narrator {
            let narrative_request = NarrativeRequest {
                query: &request.query,
                dataset_id: &request.dataset_id,
                analysis_type,
                record_count: records.len(),
                results: &results,
            };
            match narrator.narrate(&narrative_request) {
                Ok(narrative) => {
                    interpretation = narrative.analysis;
                    if !narrative.recommendations.is_empty() {
                        recommendations = narrative.recommendations;
                    }
                    insights = narrative.insights;
                    narrated = true;
                }
                Err(e) => warn!("Narrative unavailable, using engine interpretation: {e}"),
            }
        }

        Ok(AnalyticsResult {
            dataset_id: request.dataset_id.clone(),
            query: request.query.clone(),
            results,
            interpretation,
            recommendations,
            insights,
            narrated,
            record_count: records.len(),
            generated_at: Utc::now(),
            generated_by: request.requested_by.clone(),
        })
    }
}
