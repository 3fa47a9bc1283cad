//! Analytics algorithms over patient visit records
//!
//! Every function here is pure: it borrows the records, never mutates them,
//! and returns a fresh result value. The same input always gives the same
//! output.

pub mod descriptive;
pub mod distribution;
pub mod epidemiology;
pub mod forecast;
pub mod grouping;
pub mod hypothesis;
pub mod numeric;
pub mod surveillance;
pub mod trend;

// Re-export commonly used items
pub use descriptive::{DescriptiveStats, calculate_descriptive_stats};
pub use epidemiology::{EpidemiologicalMetrics, EpidemiologyParams, calculate_epidemiological_metrics};
pub use forecast::forecast_cases;
pub use grouping::{PeriodKey, TimeUnit, group_by_diagnosis, group_by_time_period};
pub use hypothesis::{StatisticalTestResult, TestType, perform_statistical_test};
pub use surveillance::{AlertLevel, SurveillanceAlert, detect_outbreak};
pub use trend::{TrendAnalysis, TrendDirection, analyze_trend};
