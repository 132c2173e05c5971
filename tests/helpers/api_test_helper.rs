// ==========================================
// API integration test environment
// ==========================================
// One temp database, one district, every API wired through AppState
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

pub use test_helpers::{scheme, ymd};

use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;

use om_readiness::api::{
    AdminApi, ConfigApi, DashboardApi, ImportApi, IssueApi, ProgressApi, SchemeApi,
};
use om_readiness::app::AppState;
use om_readiness::domain::{
    ActorScope, Component, Issue, NewDistrict, NewIssue, ProgressUpdate, ProgressValue, Scheme,
};
use om_readiness::repository::SchemeRepository;
use om_readiness::{EntryKind, IssueCategory, Role, Severity, SiteVariant};

pub const DISTRICT_CODE: &str = "AYODHYA001";

pub struct ApiTestEnv {
    pub db_path: String,
    pub district_id: String,

    pub dashboard_api: Arc<DashboardApi>,
    pub progress_api: Arc<ProgressApi>,
    pub issue_api: Arc<IssueApi>,
    pub scheme_api: Arc<SchemeApi>,
    pub config_api: Arc<ConfigApi>,
    pub admin_api: Arc<AdminApi>,
    pub import_api: Arc<ImportApi>,

    // fixture seeding
    pub scheme_repo: Arc<SchemeRepository>,

    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// Fresh database holding one active district
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let state = AppState::new(db_path.clone())?;

        let district = state.admin_api.create_district(
            &ActorScope::admin("admin"),
            &NewDistrict {
                district_name: "Ayodhya".to_string(),
                district_code: DISTRICT_CODE.to_string(),
                ..Default::default()
            },
        )?;

        Ok(Self {
            db_path,
            district_id: district.district_id,
            dashboard_api: state.dashboard_api.clone(),
            progress_api: state.progress_api.clone(),
            issue_api: state.issue_api.clone(),
            scheme_api: state.scheme_api.clone(),
            config_api: state.config_api.clone(),
            admin_api: state.admin_api.clone(),
            import_api: state.import_api.clone(),
            scheme_repo: Arc::new(SchemeRepository::new(state.conn.clone())),
            _temp_file: temp_file,
        })
    }

    pub fn admin(&self) -> ActorScope {
        ActorScope::admin("admin")
    }

    /// Admin working inside the test district
    pub fn admin_in_district(&self) -> ActorScope {
        ActorScope::district("admin", Role::Admin, &self.district_id)
    }

    pub fn manager(&self) -> ActorScope {
        ActorScope::district("manager", Role::DistrictManager, &self.district_id)
    }

    pub fn data_entry(&self) -> ActorScope {
        ActorScope::district("field.engineer", Role::DataEntry, &self.district_id)
    }

    pub fn viewer(&self) -> ActorScope {
        ActorScope::district("viewer", Role::Viewer, &self.district_id)
    }

    /// Replace the district's schemes with `schemes`
    pub fn seed_schemes(&self, schemes: &[Scheme]) {
        self.scheme_repo
            .replace_all(&self.district_id, schemes)
            .expect("seed schemes");
    }

    /// Seed one main-site scheme per (id, block, agency)
    pub fn seed_simple(&self, rows: &[(&str, &str, &str)]) {
        let schemes: Vec<Scheme> = rows
            .iter()
            .map(|(id, block, agency)| scheme(&self.district_id, id, block, agency, false))
            .collect();
        self.seed_schemes(&schemes);
    }

    /// First catalog component of the given site and kind
    pub fn component(&self, site: SiteVariant, kind: EntryKind) -> Component {
        self.progress_api
            .list_components(site)
            .expect("list components")
            .into_iter()
            .find(|c| c.kind == kind)
            .expect("catalog component")
    }

    /// Save one task entry for `scheme_id`
    pub fn save_task(&self, scheme_id: &str, percent: f64, days_remaining: i64) {
        let component = self.component(SiteVariant::Main, EntryKind::Task);
        self.progress_api
            .save_entries(
                &self.data_entry(),
                scheme_id,
                &[ProgressUpdate {
                    component_id: component.component_id,
                    value: ProgressValue::Task { percent },
                    days_remaining,
                    remarks: None,
                }],
            )
            .expect("save task entry");
    }

    pub fn report(&self, scheme_id: &str, severity: Severity, category: IssueCategory, text: &str) -> Issue {
        let component = self.component(SiteVariant::Main, EntryKind::Task);
        self.issue_api
            .report_issue(
                &self.data_entry(),
                &NewIssue {
                    scheme_id: scheme_id.to_string(),
                    component_id: component.component_id,
                    category,
                    description: text.to_string(),
                    severity,
                    expected_resolution: None,
                },
            )
            .expect("report issue")
    }
}
