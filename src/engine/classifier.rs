// ==========================================
// O&M Readiness Tracker - Status & Risk Classifier
// ==========================================
// Re-evaluated on every read, never persisted.
// Status rules are ordered; the first match wins:
//   1. engineer verification set         -> In O&M
//   2. agency submission date set        -> Under Verification
//   3. avg_progress >= 100                -> Ready for Inspection
//   4. avg_progress > 0                   -> In Progress
//   5. otherwise                          -> Not Started
// ==========================================

use crate::domain::issue::OpenIssueCounts;
use crate::domain::scheme::VerificationDates;
use crate::domain::types::{RiskTier, SchemeStatus};

/// Open issues at or above this count make a scheme High Risk
pub const HIGH_RISK_OPEN_ISSUES: i64 = 3;

pub struct StatusClassifier {
    // stateless
}

impl StatusClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// Lifecycle status; verification dates override progress
    pub fn classify_status(&self, verification: &VerificationDates, avg_progress: f64) -> SchemeStatus {
        if verification.engineer_verified.is_some() {
            SchemeStatus::InOm
        } else if verification.is_under_verification() {
            SchemeStatus::UnderVerification
        } else if avg_progress >= 100.0 {
            SchemeStatus::ReadyForInspection
        } else if avg_progress > 0.0 {
            SchemeStatus::InProgress
        } else {
            SchemeStatus::NotStarted
        }
    }

    /// Risk tier from unresolved issues only
    pub fn classify_risk(&self, counts: &OpenIssueCounts) -> RiskTier {
        if counts.critical > 0 || counts.open >= HIGH_RISK_OPEN_ISSUES {
            RiskTier::High
        } else if counts.open > 0 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new()
    }
}
