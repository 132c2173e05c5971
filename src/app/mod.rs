// ==========================================
// O&M Readiness Tracker - Application Layer
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
