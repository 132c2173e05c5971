// ==========================================
// O&M Readiness Tracker - Application State
// ==========================================
// Builds the shared connection, repositories and API instances.
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{AdminApi, ConfigApi, DashboardApi, ImportApi, IssueApi, ProgressApi, SchemeApi};
use crate::config::config_manager::ConfigManager;
use crate::db;
use crate::importer::SchemeImporterImpl;
use crate::repository::{
    ComponentRepository, DistrictRepository, IssueRepository, ProgressRepository, SchemeRepository,
};

/// Env var overriding the database location
pub const DB_PATH_ENV: &str = "OM_TRACKER_DB";

pub struct AppState {
    pub db_path: String,
    pub conn: Arc<Mutex<Connection>>,

    pub dashboard_api: Arc<DashboardApi>,
    pub progress_api: Arc<ProgressApi>,
    pub issue_api: Arc<IssueApi>,
    pub scheme_api: Arc<SchemeApi>,
    pub config_api: Arc<ConfigApi>,
    pub admin_api: Arc<AdminApi>,
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// Open (or create) the database at `db_path` and wire every API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initialising application state");

        let conn = db::open_and_prepare(&db_path)
            .map_err(|e| format!("cannot open database {}: {}", db_path, e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ===== Repositories =====
        let district_repo = Arc::new(DistrictRepository::new(conn.clone()));
        let component_repo = Arc::new(ComponentRepository::new(conn.clone()));
        let scheme_repo = Arc::new(SchemeRepository::new(conn.clone()));
        let progress_repo = Arc::new(ProgressRepository::new(conn.clone()));
        let issue_repo = Arc::new(IssueRepository::new(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );

        // ===== APIs =====
        let dashboard_api = Arc::new(DashboardApi::new(
            scheme_repo.clone(),
            progress_repo.clone(),
            issue_repo.clone(),
            config_manager.clone(),
        ));
        let progress_api = Arc::new(ProgressApi::new(
            scheme_repo.clone(),
            component_repo.clone(),
            progress_repo,
        ));
        let issue_api = Arc::new(IssueApi::new(
            scheme_repo.clone(),
            component_repo,
            issue_repo,
        ));
        let scheme_api = Arc::new(SchemeApi::new(scheme_repo.clone()));
        let config_api = Arc::new(ConfigApi::new(config_manager));
        let admin_api = Arc::new(AdminApi::new(district_repo, scheme_repo.clone()));
        let importer = Arc::new(SchemeImporterImpl::new(scheme_repo.clone()));
        let import_api = Arc::new(ImportApi::new(importer, scheme_repo));

        tracing::info!("application state ready");

        Ok(Self {
            db_path,
            conn,
            dashboard_api,
            progress_api,
            issue_api,
            scheme_api,
            config_api,
            admin_api,
            import_api,
        })
    }
}

/// Database location: OM_TRACKER_DB, else the user data directory
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./om_readiness.db");
    if let Some(data_dir) = dirs::data_local_dir() {
        let dir = data_dir.join("om-readiness");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot create data directory, using ./");
        } else {
            path = dir.join("om_readiness.db");
        }
    }

    path.to_string_lossy().to_string()
}
