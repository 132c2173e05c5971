// ==========================================
// O&M Readiness Tracker - Issue
// ==========================================
// Append-only log; the only transition is open -> resolved.
// ==========================================

use crate::domain::types::{IssueCategory, Severity};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub issue_id: String,
    pub district_id: String,
    pub scheme_id: String,
    pub component_id: i64,
    pub component_name: String,   // joined from the catalog for display
    pub category: IssueCategory,
    pub description: String,
    pub severity: Severity,
    pub reported_by: String,
    pub resolved: bool,
    pub reported_at: NaiveDateTime,
    pub expected_resolution: Option<NaiveDate>,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<NaiveDateTime>,
}

/// Input for a new issue report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub scheme_id: String,
    pub component_id: i64,
    pub category: IssueCategory,
    pub description: String,
    pub severity: Severity,
    pub expected_resolution: Option<NaiveDate>,
}

/// Unresolved issue counts of one scheme, by the classes that carry penalties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenIssueCounts {
    pub open: i64,
    pub critical: i64,
    pub high: i64,
    pub material: i64,
    pub payment: i64,
    pub contractor: i64,
}

impl OpenIssueCounts {
    /// Count one unresolved issue in every class it belongs to
    pub fn record(&mut self, severity: Severity, category: IssueCategory) {
        self.open += 1;
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            _ => {}
        }
        match category {
            IssueCategory::Material => self.material += 1,
            IssueCategory::Payment => self.payment += 1,
            IssueCategory::Contractor => self.contractor += 1,
            IssueCategory::Other => {}
        }
    }
}
