// ==========================================
// O&M Readiness Tracker - Progress Repository
// ==========================================
// Table: progress, one row per (district, scheme, component).
// Writes are upserts (last write wins); a batch commits atomically.
// The entry kind is joined from the catalog on read.
// ==========================================

use crate::db::{format_db_datetime, parse_db_datetime};
use crate::domain::progress::{ProgressEntry, ProgressUpdate, ProgressValue};
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::domain::types::EntryKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::scope_filter::build_scheme_filter;
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ProgressRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProgressRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Upsert a batch of updates for one scheme in a single transaction
    ///
    /// `progress_percent` is stored alongside each row as computed at save time.
    pub fn upsert_batch(
        &self,
        district_id: &str,
        scheme_id: &str,
        updates: &[ProgressUpdate],
        saved_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let saved_at = format_db_datetime(saved_at);
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO progress (
                    district_id, scheme_id, component_id,
                    target_value, achieved_value, progress_percent,
                    days_remaining, remarks, last_updated
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(district_id, scheme_id, component_id) DO UPDATE SET
                    target_value = excluded.target_value,
                    achieved_value = excluded.achieved_value,
                    progress_percent = excluded.progress_percent,
                    days_remaining = excluded.days_remaining,
                    remarks = excluded.remarks,
                    last_updated = excluded.last_updated
                "#,
            )?;

            for update in updates {
                let (target, achieved) = match update.value {
                    ProgressValue::Metric { target, achieved } => (Some(target), Some(achieved)),
                    ProgressValue::Task { .. } => (None, None),
                };
                stmt.execute(params![
                    district_id,
                    scheme_id,
                    update.component_id,
                    target,
                    achieved,
                    update.value.calculated_percent(),
                    update.days_remaining,
                    update.remarks,
                    saved_at,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(updates.len())
    }

    /// Entries of one scheme ordered by component
    pub fn find_by_scheme(&self, district_id: &str, scheme_id: &str) -> RepositoryResult<Vec<ProgressEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE p.district_id = ?1 AND p.scheme_id = ?2 ORDER BY p.component_id",
            SELECT_ENTRY
        ))?;
        let rows = stmt
            .query_map(params![district_id, scheme_id], map_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Entries of every scheme the scope can see
    pub fn find_in_scope(&self, scope: &ActorScope, filter: &SchemeFilter) -> RepositoryResult<Vec<ProgressEntry>> {
        let pred = build_scheme_filter(scope, filter, "s");
        let sql = format!(
            r#"{}
            JOIN schemes s ON s.district_id = p.district_id AND s.scheme_id = p.scheme_id
            WHERE {}
            ORDER BY p.scheme_id, p.component_id"#,
            SELECT_ENTRY, pred.clause
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(pred.params.iter()), map_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

const SELECT_ENTRY: &str = r#"
    SELECT p.scheme_id, p.component_id, c.entry_type,
           p.target_value, p.achieved_value, p.progress_percent,
           p.days_remaining, p.remarks, p.last_updated
    FROM progress p
    JOIN components c ON c.component_id = p.component_id
"#;

fn map_entry(row: &Row<'_>) -> rusqlite::Result<ProgressEntry> {
    let kind = EntryKind::from_str(&row.get::<_, String>(2)?);
    let progress_percent: f64 = row.get(5)?;
    let value = match kind {
        EntryKind::Metric => ProgressValue::Metric {
            target: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
            achieved: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        },
        EntryKind::Task => ProgressValue::Task {
            percent: progress_percent,
        },
    };

    Ok(ProgressEntry {
        scheme_id: row.get(0)?,
        component_id: row.get(1)?,
        value,
        progress_percent,
        days_remaining: row.get(6)?,
        remarks: row.get(7)?,
        last_updated: parse_db_datetime(row.get(8)?),
    })
}
