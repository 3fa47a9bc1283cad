//! Tests for the moving-average forecast

use hospital_analytics::algorithm::forecast::{cascading_moving_average, forecast_cases};

use crate::utils::monthly_counts;

#[test]
fn test_three_month_history() {
    // [3, 6, 9] -> 6, then [6, 9, 6] -> 7, then [9, 6, 7] -> 7.33
    assert_eq!(forecast_cases(&monthly_counts(&[3, 6, 9]), 3), vec![6, 7, 7]);
}

#[test]
fn test_forecast_length_matches_periods() {
    let records = monthly_counts(&[10, 12, 14, 16, 18]);
    for periods in [0, 1, 6, 12] {
        assert_eq!(forecast_cases(&records, periods).len(), periods);
    }
}

#[test]
fn test_short_history_is_zero() {
    assert_eq!(forecast_cases(&monthly_counts(&[100, 200]), 4), vec![0, 0, 0, 0]);
}

#[test]
fn test_predictions_feed_the_window() {
    let forecast = cascading_moving_average(vec![3.0, 6.0, 9.0], 3);
    assert_eq!(forecast[0], 6.0);
    assert_eq!(forecast[1], 7.0);
    assert!((forecast[2] - 22.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_constant_history_forecasts_constant() {
    assert_eq!(forecast_cases(&monthly_counts(&[8, 8, 8, 8]), 6), vec![8; 6]);
}
