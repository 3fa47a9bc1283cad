//! Tests for adapting uploaded rows into records

use hospital_analytics::models::adapter::record_from_value;
use hospital_analytics::{
    AnalysisType, AnalyticsEngine, AnalyticsError, NumericField, SyntheticDataGenerator,
    records_from_json,
};

use crate::utils::on;

#[test]
fn test_uploaded_rows_feed_the_engine() {
    let json = r#"[
        {"id": "1", "sex": "female", "visitDate": "2024-01-05", "age": 30, "diagnosis": "Malaria", "outcome": "Died"},
        {"id": "2", "sex": "male", "visit_date": "2024-01-09", "age": "50", "diagnosis": "Malaria", "outcome": "Discharged"},
        {"id": "3", "sex": "F", "visitDate": "2024-02-11T08:00:00+03:00", "age": null, "diagnosis": "Malaria"}
    ]"#;
    let records = records_from_json(json).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].visit_date, on(2024, 2, 11));

    let engine = AnalyticsEngine::default();
    let stats = engine.descriptive(&records).unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.mean, 40.0);

    let metrics = engine.epidemiological(&records).unwrap();
    assert_eq!(metrics.deaths, 1);
    assert_eq!(metrics.case_fatality_rate, 33.33);

    let results = engine.run(AnalysisType::Trend, &records).unwrap();
    assert_eq!(results.analysis_type(), AnalysisType::Trend);
}

#[test]
fn test_serialized_records_adapt_back() {
    let records = SyntheticDataGenerator::new(Some(5))
        .ipd_records(20, on(2024, 1, 1), on(2024, 6, 1), "ipd")
        .unwrap();
    let json = serde_json::to_string(&records).unwrap();
    assert_eq!(records_from_json(&json).unwrap(), records);
}

#[test]
fn test_malformed_rows_are_reported() {
    let missing_date = serde_json::json!({"id": "9", "sex": "male"});
    match record_from_value(&missing_date) {
        Err(AnalyticsError::MalformedRecord(message)) => assert!(message.contains("record 9")),
        other => panic!("expected a malformed record error, got {other:?}"),
    }
    assert!(matches!(records_from_json("not json"), Err(AnalyticsError::Json(_))));
}

#[test]
fn test_field_names_parse() {
    for (raw, field) in [
        ("age", NumericField::Age),
        ("waitingTime", NumericField::WaitingTime),
        ("waiting_time", NumericField::WaitingTime),
        ("length_of_stay", NumericField::LengthOfStay),
    ] {
        assert_eq!(raw.parse::<NumericField>().unwrap(), field);
    }
}
