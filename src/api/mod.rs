// ==========================================
// O&M Readiness Tracker - API Layer
// ==========================================
// Entry points for the presentation layer. Every call takes the
// resolved ActorScope; role and scope checks happen here.
// ==========================================

pub mod admin_api;
pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod import_api;
pub mod issue_api;
pub mod progress_api;
pub mod scheme_api;
pub mod validator;

pub use admin_api::{AdminApi, DistrictSchemeCount, SystemStatistics};
pub use config_api::ConfigApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
pub use issue_api::IssueApi;
pub use progress_api::ProgressApi;
pub use scheme_api::SchemeApi;
