// ==========================================
// O&M Readiness Tracker - Evaluation Records
// ==========================================
// Read-side records produced by the engines and handed to the
// external report renderer. Re-derived on every read.
// ==========================================

use crate::domain::issue::OpenIssueCounts;
use crate::domain::scheme::Scheme;
use crate::domain::types::{RiskTier, SchemeStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated progress of one scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub avg_progress: f64,       // 1 decimal
    pub max_days_remaining: i64, // critical-path component
    pub entry_count: usize,
}

/// Issue-driven delay on top of the critical path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDelay {
    pub issue_delay_days: i64,
    pub adjusted_days_remaining: i64,
}

/// Projected calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub physical_completion_date: NaiveDate,
    pub forecasted_om_date: NaiveDate,
}

/// Full evaluation of one scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeEvaluation {
    pub scheme: Scheme,
    pub progress: ProgressSummary,
    pub delay: IssueDelay,
    pub open_issues: OpenIssueCounts,
    pub status: SchemeStatus,
    pub risk: RiskTier,
    /// Empty unless the problem flag is raised
    pub problem_reasons: Vec<String>,
}

impl SchemeEvaluation {
    pub fn is_problem(&self) -> bool {
        !self.problem_reasons.is_empty()
    }
}

// ==========================================
// Report rows
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: SchemeStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub scheme_id: String,
    pub scheme_name: String,
    pub block: String,
    pub agency: String,
    pub status: SchemeStatus,
    pub risk: RiskTier,
    pub avg_progress: f64,
    pub max_days_remaining: i64,
    pub issue_delay_days: i64,
    pub adjusted_days_remaining: i64,
    pub physical_completion_date: NaiveDate,
    pub forecasted_om_date: NaiveDate,
}

/// Forecast rows falling into one calendar month (YYYY-MM)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyForecastCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemScheme {
    pub scheme_id: String,
    pub scheme_name: String,
    pub block: String,
    pub agency: String,
    pub avg_progress: f64,
    pub adjusted_days_remaining: i64,
    pub open_issues: i64,
    pub critical_issues: i64,
    pub reasons: Vec<String>,
}

/// Every report table built from one evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTables {
    pub status_summary: Vec<StatusCount>,
    pub forecast: Vec<ForecastRow>,
    pub monthly_om_forecast: Vec<MonthlyForecastCount>,
    pub problem_schemes: Vec<ProblemScheme>,
}
