//! Tests for query dispatch and narration

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use hospital_analytics::{
    AnalysisRequest, AnalysisResults, AnalysisType, AnalyticsEngine, AnalyticsError,
    AnalyticsResult, Dispatcher, EngineConfig, Narrative, NarrativeRequest, Narrator,
    PatientRecord, Result, Sex, SyntheticDataGenerator,
};

use crate::utils::{monthly_counts, weekly_counts, with_ages};

struct FixedNarrator {
    calls: Arc<AtomicUsize>,
}

impl Narrator for FixedNarrator {
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Result<Narrative> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Narrative {
            analysis: format!("{} records analysed for {:?}", request.record_count, request.query),
            insights: vec!["Cases cluster in the rainy season".to_string()],
            recommendations: Vec::new(),
        })
    }
}

struct FailingNarrator;

impl Narrator for FailingNarrator {
    fn narrate(&self, _request: &NarrativeRequest<'_>) -> Result<Narrative> {
        Err(AnalyticsError::Narrative("service unavailable".to_string()))
    }
}

fn demo_records() -> Vec<PatientRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    SyntheticDataGenerator::new(Some(11))
        .opd_records(400, start, end, "demo")
        .unwrap()
}

#[test]
fn test_query_selects_analysis() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let records = demo_records();
    let cases = [
        ("Show the trend of visits", AnalysisType::Trend),
        ("What is the prevalence?", AnalysisType::Epidemiological),
        ("Any abnormal spikes?", AnalysisType::Surveillance),
        ("compare waiting by sex", AnalysisType::Statistical),
        ("predict next months", AnalysisType::Forecasting),
        ("summarise patient ages", AnalysisType::Descriptive),
    ];
    for (query, expected) in cases {
        let result = dispatcher.analyze(&AnalysisRequest::new("demo", query), &records).unwrap();
        assert_eq!(result.analysis_type(), expected, "{query}");
        assert_eq!(result.record_count, 400);
        assert_eq!(result.query, query);
        assert!(!result.narrated);
        assert!(result.insights.is_empty());
        assert!(!result.interpretation.is_empty());
        assert!(!result.recommendations.is_empty());
    }
}

#[test]
fn test_engine_interpretation_for_trend() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let request = AnalysisRequest::new("ds", "malaria trend").requested_by("analyst-7");
    let result = dispatcher.analyze(&request, &monthly_counts(&[10, 20, 30])).unwrap();
    assert_eq!(result.interpretation, "The data shows a increasing trend with 200% change.");
    assert_eq!(result.recommendations[0], "Monitor the increasing trend");
    assert_eq!(result.generated_by, "analyst-7");
}

#[test]
fn test_surveillance_recommendations_come_from_alert() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let records = weekly_counts("Cholera", &[5, 5, 5, 5, 20]);
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "outbreak check"), &records).unwrap();
    assert_eq!(
        result.interpretation,
        "1 potential outbreak(s) detected requiring immediate attention."
    );
    assert_eq!(result.recommendations[0], "Investigate potential outbreak source");
}

#[test]
fn test_narrator_replaces_text() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = Dispatcher::new(AnalyticsEngine::default()).with_narrator(Box::new(FixedNarrator {
        calls: Arc::clone(&calls),
    }));
    let records = with_ages(Sex::Female, &[30, 40]);
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "average age"), &records).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.narrated);
    assert_eq!(result.interpretation, "2 records analysed for \"average age\"");
    assert_eq!(result.insights, vec!["Cases cluster in the rainy season"]);
    // Empty narrated recommendations keep the engine's
    assert_eq!(result.recommendations[0], "Consider age-specific interventions");
}

#[test]
fn test_failing_narrator_falls_back() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default()).with_narrator(Box::new(FailingNarrator));
    let records = with_ages(Sex::Male, &[30, 40]);
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "average age"), &records).unwrap();
    assert!(!result.narrated);
    assert_eq!(
        result.interpretation,
        "Found 2 total records with 0 different diagnoses. \
         The average patient age is 35 years with a standard deviation of 7.07."
    );
}

#[test]
fn test_descriptive_summary_counts_diagnoses() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let mut records = weekly_counts("Malaria", &[2, 1]);
    records.extend(weekly_counts("Cholera", &[1]));
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "summary"), &records).unwrap();
    assert_eq!(result.record_count, 4);
    assert!(
        result
            .interpretation
            .starts_with("Found 4 total records with 2 different diagnoses. ")
    );
}

#[test]
fn test_statistical_without_both_sexes_is_error() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let records = with_ages(Sex::Female, &[30, 40]);
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "compare groups"), &records);
    assert!(matches!(result, Err(AnalyticsError::InsufficientData(_))));
}

#[test]
fn test_configured_engine_and_serialization() {
    let config = EngineConfig::new().with_forecast_periods(2);
    let dispatcher = Dispatcher::new(AnalyticsEngine::new(config).unwrap());
    let request = AnalysisRequest::new("ds", "anything").with_analysis_type(AnalysisType::Forecasting);
    let result = dispatcher.analyze(&request, &monthly_counts(&[3, 6, 9])).unwrap();
    assert_eq!(
        result.results,
        AnalysisResults::Forecasting {
            periods: 2,
            forecast: vec![6, 7]
        }
    );

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["analysisType"], "forecasting");
    assert_eq!(json["datasetId"], "ds");
    assert!(json.get("insights").is_none());
}

#[test]
fn test_repeat_analysis_is_stable() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let records = demo_records();
    let request = AnalysisRequest::new("demo", "outbreak");
    let first = dispatcher.analyze(&request, &records).unwrap();
    let second = dispatcher.analyze(&request, &records).unwrap();
    assert_eq!(first.results, second.results);
    assert_eq!(first.interpretation, second.interpretation);
}

#[test]
fn test_degenerate_comparison_survives_json() {
    let dispatcher = Dispatcher::new(AnalyticsEngine::default());
    let mut records = with_ages(Sex::Female, &[30, 30]);
    records.extend(with_ages(Sex::Male, &[40, 40]));
    let result = dispatcher.analyze(&AnalysisRequest::new("ds", "compare ages"), &records).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("null"));
    let parsed: AnalyticsResult = serde_json::from_str(&json).unwrap();
    match parsed.results {
        AnalysisResults::Statistical(test) => {
            assert!(test.statistic.is_finite());
            assert!(test.statistic < -1e300);
            assert_eq!(test.p_value, 0.0);
            assert!(test.is_significant);
        }
        other => panic!("expected a statistical result, got {other:?}"),
    }
}
