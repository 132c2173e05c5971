// ==========================================
// O&M Readiness Tracker - Scheme Repository
// ==========================================
// Table: schemes, keyed by (district_id, scheme_id).
// Reads are always narrowed by the actor scope predicate.
// ==========================================

use crate::db::{format_db_date, parse_db_date};
use crate::domain::scheme::{Scheme, VerificationDates};
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::scope_filter::build_scheme_filter;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// Rows replaced by a scheme import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReplaceCounts {
    pub removed_schemes: usize,
    pub removed_progress: usize,
    pub removed_issues: usize,
    pub inserted_schemes: usize,
}

pub struct SchemeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SchemeRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Schemes visible to the scope, ordered by serial number then id
    pub fn find_in_scope(&self, scope: &ActorScope, filter: &SchemeFilter) -> RepositoryResult<Vec<Scheme>> {
        let pred = build_scheme_filter(scope, filter, "s");
        let sql = format!(
            "{} WHERE {} ORDER BY s.district_id, s.sr_no IS NULL, s.sr_no, s.scheme_id",
            SELECT_SCHEME, pred.clause
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(pred.params.iter()), map_scheme)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// One scheme, only if the scope can see it
    pub fn find_by_id(&self, scope: &ActorScope, scheme_id: &str) -> RepositoryResult<Option<Scheme>> {
        let pred = build_scheme_filter(scope, &SchemeFilter::default(), "s");
        let sql = format!(
            "{} WHERE {} AND s.scheme_id = ? ORDER BY s.district_id LIMIT 1",
            SELECT_SCHEME, pred.clause
        );
        let mut values = pred.params;
        values.push(Value::Text(scheme_id.to_string()));

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let scheme = stmt
            .query_map(params_from_iter(values.iter()), map_scheme)?
            .next()
            .transpose()?;
        Ok(scheme)
    }

    pub fn update_verification(
        &self,
        district_id: &str,
        scheme_id: &str,
        dates: &VerificationDates,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            r#"
            UPDATE schemes SET
                agency_submitted_date = ?1,
                tpia_verified_date = ?2,
                ee_verified_date = ?3
            WHERE district_id = ?4 AND scheme_id = ?5
            "#,
            params![
                format_db_date(dates.agency_submitted),
                format_db_date(dates.third_party_verified),
                format_db_date(dates.engineer_verified),
                district_id,
                scheme_id,
            ],
        )?;
        if n == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Scheme".to_string(),
                id: scheme_id.to_string(),
            });
        }
        Ok(())
    }

    /// Replace the district's scheme list; progress and issues go with it
    pub fn replace_all(&self, district_id: &str, schemes: &[Scheme]) -> RepositoryResult<ReplaceCounts> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut counts = ReplaceCounts {
            removed_progress: tx.execute("DELETE FROM progress WHERE district_id = ?1", params![district_id])?,
            removed_issues: tx.execute("DELETE FROM issues WHERE district_id = ?1", params![district_id])?,
            removed_schemes: tx.execute("DELETE FROM schemes WHERE district_id = ?1", params![district_id])?,
            inserted_schemes: 0,
        };

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO schemes (
                    scheme_id, district_id, sr_no, block, agency, scheme_name,
                    has_secondary_site, agency_submitted_date, tpia_verified_date, ee_verified_date
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )?;
            for scheme in schemes {
                stmt.execute(params![
                    scheme.scheme_id,
                    district_id,
                    scheme.sr_no,
                    scheme.block,
                    scheme.agency,
                    scheme.scheme_name,
                    scheme.has_secondary_site,
                    format_db_date(scheme.verification.agency_submitted),
                    format_db_date(scheme.verification.third_party_verified),
                    format_db_date(scheme.verification.engineer_verified),
                ])?;
                counts.inserted_schemes += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(counts)
    }

    /// (district_id, district_name, scheme count) for every active district
    pub fn count_by_active_district(&self) -> RepositoryResult<Vec<(String, String, i64)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT d.district_id, d.district_name, COUNT(s.scheme_id)
            FROM districts d
            LEFT JOIN schemes s ON s.district_id = d.district_id
            WHERE d.is_active = 1
            GROUP BY d.district_id, d.district_name
            ORDER BY d.district_name
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count_all(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM schemes", [], |row| row.get(0))?;
        Ok(n)
    }
}

const SELECT_SCHEME: &str = r#"
    SELECT s.scheme_id, s.district_id, s.sr_no, s.block, s.agency, s.scheme_name,
           s.has_secondary_site, s.agency_submitted_date, s.tpia_verified_date, s.ee_verified_date
    FROM schemes s
"#;

fn map_scheme(row: &Row<'_>) -> rusqlite::Result<Scheme> {
    Ok(Scheme {
        scheme_id: row.get(0)?,
        district_id: row.get(1)?,
        sr_no: row.get(2)?,
        block: row.get(3)?,
        agency: row.get(4)?,
        scheme_name: row.get(5)?,
        has_secondary_site: row.get(6)?,
        verification: VerificationDates {
            agency_submitted: parse_db_date(row.get(7)?),
            third_party_verified: parse_db_date(row.get(8)?),
            engineer_verified: parse_db_date(row.get(9)?),
        },
    })
}
