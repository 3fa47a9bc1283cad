//! Tests for trend and seasonality analysis

use hospital_analytics::algorithm::trend::{analyze_trend, detect_seasonality};
use hospital_analytics::{TimeUnit, TrendDirection};

use crate::utils::{monthly_counts, on, visit, weekly_counts};

#[test]
fn test_increasing_monthly_trend() {
    let analysis = analyze_trend(&monthly_counts(&[10, 20, 30, 40]), TimeUnit::Monthly);
    assert_eq!(analysis.trend, TrendDirection::Increasing);
    assert_eq!(analysis.percent_change, 300.0);
    assert_eq!(analysis.confidence, 10.0);
    assert!(!analysis.seasonal_pattern);
    let periods: Vec<&str> = analysis.series.iter().map(|p| p.period.as_str()).collect();
    assert_eq!(periods, vec!["2022-01", "2022-02", "2022-03", "2022-04"]);
}

#[test]
fn test_decreasing_monthly_trend() {
    let analysis = analyze_trend(&monthly_counts(&[40, 30, 20, 10]), TimeUnit::Monthly);
    assert_eq!(analysis.trend, TrendDirection::Decreasing);
    assert_eq!(analysis.percent_change, -75.0);
}

#[test]
fn test_flat_and_short_series_are_stable() {
    let flat = analyze_trend(&monthly_counts(&[5, 5, 5]), TimeUnit::Monthly);
    assert_eq!(flat.trend, TrendDirection::Stable);
    assert_eq!(flat.percent_change, 0.0);
    assert_eq!(flat.confidence, 0.0);

    let single = analyze_trend(&monthly_counts(&[7]), TimeUnit::Monthly);
    assert_eq!(single.trend, TrendDirection::Stable);
    assert_eq!(single.series.len(), 1);

    let empty = analyze_trend(&[], TimeUnit::Monthly);
    assert_eq!(empty.trend, TrendDirection::Stable);
    assert!(empty.series.is_empty());
}

#[test]
fn test_records_out_of_order_are_bucketed_chronologically() {
    let mut records = monthly_counts(&[10, 20, 30]);
    records.reverse();
    let analysis = analyze_trend(&records, TimeUnit::Monthly);
    assert_eq!(analysis.trend, TrendDirection::Increasing);
    assert_eq!(analysis.percent_change, 200.0);
}

#[test]
fn test_weekly_and_yearly_buckets() {
    let weekly = analyze_trend(&weekly_counts("Measles", &[1, 2, 3]), TimeUnit::Weekly);
    assert_eq!(weekly.series[0].period, "2024-01-07");
    assert_eq!(weekly.trend, TrendDirection::Increasing);

    let records = vec![
        visit("a", on(2022, 5, 1), "Measles"),
        visit("b", on(2023, 5, 1), "Measles"),
        visit("c", on(2023, 6, 1), "Measles"),
    ];
    let yearly = analyze_trend(&records, TimeUnit::Yearly);
    assert_eq!(yearly.series.len(), 2);
    assert_eq!(yearly.series[1].period, "2023");
    assert_eq!(yearly.percent_change, 100.0);
    assert!(!yearly.seasonal_pattern);
}

#[test]
fn test_repeating_year_is_seasonal() {
    let year = [5, 6, 8, 12, 15, 18, 20, 19, 16, 12, 8, 6];
    let counts: Vec<usize> = year.iter().chain(year.iter()).copied().collect();
    let analysis = analyze_trend(&monthly_counts(&counts), TimeUnit::Monthly);
    assert!(analysis.seasonal_pattern);
}

#[test]
fn test_seasonality_needs_a_year_of_variation() {
    assert!(!detect_seasonality(&[5.0; 11]));
    assert!(!detect_seasonality(&[5.0; 24]));
}

#[test]
fn test_idempotent() {
    let records = monthly_counts(&[3, 9, 4, 12, 7]);
    assert_eq!(
        analyze_trend(&records, TimeUnit::Monthly),
        analyze_trend(&records, TimeUnit::Monthly)
    );
}
