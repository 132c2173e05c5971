// ==========================================
// Test helpers
// ==========================================
// Temp database creation and scheme fixtures
// ==========================================

use chrono::NaiveDate;
use std::error::Error;
use tempfile::NamedTempFile;

use om_readiness::db;
use om_readiness::domain::{Scheme, VerificationDates};

/// Temp database with schema and component catalog in place
///
/// # Returns
/// - NamedTempFile: keep alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = db::open_and_prepare(&db_path)?;
    drop(conn);

    Ok((temp_file, db_path))
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Scheme with no verification dates
pub fn scheme(district_id: &str, scheme_id: &str, block: &str, agency: &str, tw2: bool) -> Scheme {
    Scheme {
        scheme_id: scheme_id.to_string(),
        district_id: district_id.to_string(),
        sr_no: None,
        block: block.to_string(),
        agency: agency.to_string(),
        scheme_name: format!("Scheme {}", scheme_id),
        has_secondary_site: tw2,
        verification: VerificationDates::default(),
    }
}
