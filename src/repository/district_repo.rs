// ==========================================
// O&M Readiness Tracker - District Repository
// ==========================================
// Table: districts. The wipe removes every row the district owns
// (progress, issues, schemes, settings) inside one transaction.
// ==========================================

use crate::db::{format_db_datetime, parse_db_datetime};
use crate::domain::district::District;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Rows removed by a district wipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct WipeCounts {
    pub progress: usize,
    pub issues: usize,
    pub schemes: usize,
    pub settings: usize,
}

pub struct DistrictRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DistrictRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, district: &District) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO districts (
                district_id, district_name, district_code,
                contact_person, contact_email, contact_phone,
                is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                district.district_id,
                district.district_name,
                district.district_code,
                district.contact_person,
                district.contact_email,
                district.contact_phone,
                district.is_active,
                format_db_datetime(district.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, district_id: &str) -> RepositoryResult<Option<District>> {
        let conn = self.get_conn()?;
        let district = conn
            .query_row(
                &format!("{} WHERE district_id = ?1", SELECT_DISTRICT),
                params![district_id],
                map_district,
            )
            .optional()?;
        Ok(district)
    }

    pub fn find_by_code(&self, district_code: &str) -> RepositoryResult<Option<District>> {
        let conn = self.get_conn()?;
        let district = conn
            .query_row(
                &format!("{} WHERE district_code = ?1", SELECT_DISTRICT),
                params![district_code],
                map_district,
            )
            .optional()?;
        Ok(district)
    }

    /// All districts ordered by name
    pub fn list_all(&self) -> RepositoryResult<Vec<District>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY district_name", SELECT_DISTRICT))?;
        let rows = stmt
            .query_map([], map_district)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Returns false when the district does not exist
    pub fn set_active(&self, district_id: &str, active: bool) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            "UPDATE districts SET is_active = ?1 WHERE district_id = ?2",
            params![active, district_id],
        )?;
        Ok(n > 0)
    }

    pub fn count_active(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row(
            "SELECT COUNT(*) FROM districts WHERE is_active = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// Delete the district and everything it owns
    pub fn wipe(&self, district_id: &str) -> RepositoryResult<WipeCounts> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let counts = WipeCounts {
            progress: tx.execute("DELETE FROM progress WHERE district_id = ?1", params![district_id])?,
            issues: tx.execute("DELETE FROM issues WHERE district_id = ?1", params![district_id])?,
            schemes: tx.execute("DELETE FROM schemes WHERE district_id = ?1", params![district_id])?,
            settings: tx.execute(
                "DELETE FROM config_kv WHERE scope_id = ?1",
                params![format!("district:{}", district_id)],
            )?,
        };

        let removed = tx.execute("DELETE FROM districts WHERE district_id = ?1", params![district_id])?;
        if removed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "District".to_string(),
                id: district_id.to_string(),
            });
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(counts)
    }
}

const SELECT_DISTRICT: &str = r#"
    SELECT district_id, district_name, district_code,
           contact_person, contact_email, contact_phone,
           is_active, created_at
    FROM districts
"#;

fn map_district(row: &Row<'_>) -> rusqlite::Result<District> {
    Ok(District {
        district_id: row.get(0)?,
        district_name: row.get(1)?,
        district_code: row.get(2)?,
        contact_person: row.get(3)?,
        contact_email: row.get(4)?,
        contact_phone: row.get(5)?,
        is_active: row.get(6)?,
        created_at: parse_db_datetime(row.get(7)?).unwrap_or_default(),
    })
}
