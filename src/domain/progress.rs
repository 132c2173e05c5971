// ==========================================
// O&M Readiness Tracker - Progress Entry
// ==========================================
// One row per (district, scheme, component); last write wins.
// ==========================================

use crate::domain::types::EntryKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Value recorded for a component, shaped by its entry kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressValue {
    Metric { target: f64, achieved: f64 },
    Task { percent: f64 },
}

impl ProgressValue {
    pub fn kind(&self) -> EntryKind {
        match self {
            ProgressValue::Metric { .. } => EntryKind::Metric,
            ProgressValue::Task { .. } => EntryKind::Task,
        }
    }

    /// Calculated percent; a metric with no positive target counts as 0
    pub fn calculated_percent(&self) -> f64 {
        match *self {
            ProgressValue::Metric { target, achieved } => {
                if target > 0.0 {
                    achieved / target * 100.0
                } else {
                    0.0
                }
            }
            ProgressValue::Task { percent } => percent,
        }
    }
}

/// Stored progress row joined with its component kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub scheme_id: String,
    pub component_id: i64,
    pub value: ProgressValue,
    pub progress_percent: f64,  // percent as stored at save time
    pub days_remaining: i64,
    pub remarks: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

/// One component update submitted from the entry form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub component_id: i64,
    pub value: ProgressValue,
    pub days_remaining: i64,
    pub remarks: Option<String>,
}
