// ==========================================
// O&M Readiness Tracker - Domain Types
// ==========================================
// Enumerations shared by the store, the engines and the API layer.
// Database encoding: lower-case tokens for catalog fields, display
// labels for severity (matching what operators type in reports).
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Site Variant
// ==========================================
// main = primary site, secondary = TW-2 borewell site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteVariant {
    Main,
    Secondary,
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteVariant::Main => write!(f, "Main Site"),
            SiteVariant::Secondary => write!(f, "TW-2 Site"),
        }
    }
}

impl SiteVariant {
    /// Parse the stored token. Unknown values map to `Main`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "secondary" | "tw2" | "tw-2" => SiteVariant::Secondary,
            _ => SiteVariant::Main,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            SiteVariant::Main => "main",
            SiteVariant::Secondary => "secondary",
        }
    }
}

// ==========================================
// Entry Kind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Metric, // target vs achieved quantity
    Task,   // direct percent-complete
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl EntryKind {
    /// Parse the stored token. Unknown values map to `Task`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "metric" => EntryKind::Metric,
            _ => EntryKind::Task,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryKind::Metric => "metric",
            EntryKind::Task => "task",
        }
    }
}

// ==========================================
// Issue Severity
// ==========================================
// Order: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl Severity {
    /// Parse the stored label (case-insensitive). Unknown values map to `Low`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

// ==========================================
// Issue Category
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Material,
    Contractor,
    Payment,
    Other,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl IssueCategory {
    /// Parse the stored token. Unknown values map to `Other`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "material" => IssueCategory::Material,
            "contractor" => IssueCategory::Contractor,
            "payment" => IssueCategory::Payment,
            _ => IssueCategory::Other,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            IssueCategory::Material => "material",
            IssueCategory::Contractor => "contractor",
            IssueCategory::Payment => "payment",
            IssueCategory::Other => "other",
        }
    }
}

// ==========================================
// Scheme Status (lifecycle)
// ==========================================
// Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemeStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Ready for Inspection")]
    ReadyForInspection,
    #[serde(rename = "Under Verification")]
    UnderVerification,
    #[serde(rename = "In O&M")]
    InOm,
}

impl SchemeStatus {
    /// Fixed report order, earliest lifecycle stage first.
    pub const ALL: [SchemeStatus; 5] = [
        SchemeStatus::NotStarted,
        SchemeStatus::InProgress,
        SchemeStatus::ReadyForInspection,
        SchemeStatus::UnderVerification,
        SchemeStatus::InOm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SchemeStatus::NotStarted => "Not Started",
            SchemeStatus::InProgress => "In Progress",
            SchemeStatus::ReadyForInspection => "Ready for Inspection",
            SchemeStatus::UnderVerification => "Under Verification",
            SchemeStatus::InOm => "In O&M",
        }
    }

    /// Only these statuses have a meaningful forward projection.
    pub fn is_forecastable(&self) -> bool {
        matches!(
            self,
            SchemeStatus::InProgress | SchemeStatus::ReadyForInspection
        )
    }
}

impl fmt::Display for SchemeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// Risk Tier
// ==========================================
// Order: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low Risk"),
            RiskTier::Medium => write!(f, "Medium Risk"),
            RiskTier::High => write!(f, "High Risk"),
        }
    }
}

// ==========================================
// Actor Role
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    DistrictManager,
    DataEntry,
    Viewer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::DistrictManager => write!(f, "DISTRICT_MANAGER"),
            Role::DataEntry => write!(f, "DATA_ENTRY"),
            Role::Viewer => write!(f, "VIEWER"),
        }
    }
}

impl Role {
    /// Progress entry and issue reporting
    pub fn can_enter_data(&self) -> bool {
        matches!(self, Role::DistrictManager | Role::DataEntry)
    }

    /// Delay penalties are process-wide; only privileged roles edit them
    pub fn can_edit_penalties(&self) -> bool {
        matches!(self, Role::Admin | Role::DistrictManager)
    }

    /// Verification dates, scheme import, district settings
    pub fn can_manage_district(&self) -> bool {
        matches!(self, Role::DistrictManager)
    }

    /// District lifecycle (create, deactivate, wipe)
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
