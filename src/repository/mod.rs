// ==========================================
// O&M Readiness Tracker - Repository Layer
// ==========================================
// Data access only; no status, risk or forecast logic here.
// All queries are parameterized.
// ==========================================

pub mod component_repo;
pub mod district_repo;
pub mod error;
pub mod issue_repo;
pub mod progress_repo;
pub mod scheme_repo;
pub mod scope_filter;

pub use component_repo::ComponentRepository;
pub use district_repo::{DistrictRepository, WipeCounts};
pub use error::{RepositoryError, RepositoryResult};
pub use issue_repo::IssueRepository;
pub use progress_repo::ProgressRepository;
pub use scheme_repo::{ReplaceCounts, SchemeRepository};
pub use scope_filter::{build_scheme_filter, SchemePredicate};
