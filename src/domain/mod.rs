// ==========================================
// O&M Readiness Tracker - Domain Layer
// ==========================================
// Entities, value types and read-side records.
// No data access and no rule evaluation here.
// ==========================================

pub mod component;
pub mod district;
pub mod evaluation;
pub mod issue;
pub mod progress;
pub mod scheme;
pub mod scope;
pub mod types;

pub use component::Component;
pub use district::{District, NewDistrict};
pub use evaluation::{
    Forecast, ForecastRow, IssueDelay, MonthlyForecastCount, ProblemScheme, ProgressSummary,
    ReportTables, SchemeEvaluation, StatusCount,
};
pub use issue::{Issue, NewIssue, OpenIssueCounts};
pub use progress::{ProgressEntry, ProgressUpdate, ProgressValue};
pub use scheme::{Scheme, VerificationDates};
pub use scope::{ActorScope, SchemeFilter};
pub use types::{EntryKind, IssueCategory, RiskTier, Role, SchemeStatus, Severity, SiteVariant};
