// ==========================================
// O&M Readiness Tracker - Engine Layer
// ==========================================
// Pure rule evaluation: progress aggregation, issue delay,
// status classification and O&M forecasting. No SQL here.
// ==========================================

pub mod catalog;
pub mod classifier;
pub mod evaluator;
pub mod forecast;
pub mod issue_delay;
pub mod notification;
pub mod progress;
pub mod report;

pub use catalog::{CatalogItem, DEFAULT_COMPONENTS};
pub use classifier::StatusClassifier;
pub use evaluator::{group_entries_by_scheme, SchemeEvaluator};
pub use forecast::{ForecastProjector, DEFAULT_BUFFER_DAYS, MAX_BUFFER_DAYS, MAX_DAYS_REMAINING};
pub use issue_delay::IssueDelayModel;
pub use notification::IssueSummaryFormatter;
pub use progress::ProgressAggregator;
