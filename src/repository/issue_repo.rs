// ==========================================
// O&M Readiness Tracker - Issue Repository
// ==========================================
// Table: issues. Rows are never deleted by normal operation;
// the only update is open -> resolved, guarded in SQL.
// ==========================================

use crate::db::{format_db_date, format_db_datetime, parse_db_date, parse_db_datetime};
use crate::domain::issue::{Issue, OpenIssueCounts};
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::domain::types::{IssueCategory, Severity};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::scope_filter::build_scheme_filter;
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct IssueRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IssueRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, issue: &Issue) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO issues (
                issue_id, district_id, scheme_id, component_id,
                category, description, severity, reported_by,
                resolved, reported_at, expected_resolution_date,
                resolved_by, resolved_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                issue.issue_id,
                issue.district_id,
                issue.scheme_id,
                issue.component_id,
                issue.category.to_db_str(),
                issue.description,
                issue.severity.to_db_str(),
                issue.reported_by,
                issue.resolved,
                format_db_datetime(issue.reported_at),
                format_db_date(issue.expected_resolution),
                issue.resolved_by,
                issue.resolved_at.map(format_db_datetime),
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, district_id: &str, issue_id: &str) -> RepositoryResult<Option<Issue>> {
        let conn = self.get_conn()?;
        let issue = conn
            .query_row(
                &format!("{} WHERE i.district_id = ?1 AND i.issue_id = ?2", SELECT_ISSUE),
                params![district_id, issue_id],
                map_issue,
            )
            .optional()?;
        Ok(issue)
    }

    /// Mark resolved; an already resolved issue is rejected
    pub fn resolve(
        &self,
        district_id: &str,
        issue_id: &str,
        resolved_by: &str,
        resolved_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            r#"
            UPDATE issues SET resolved = 1, resolved_by = ?1, resolved_at = ?2
            WHERE district_id = ?3 AND issue_id = ?4 AND resolved = 0
            "#,
            params![resolved_by, format_db_datetime(resolved_at), district_id, issue_id],
        )?;

        if n == 0 {
            let exists: Option<bool> = conn
                .query_row(
                    "SELECT resolved FROM issues WHERE district_id = ?1 AND issue_id = ?2",
                    params![district_id, issue_id],
                    |row| row.get(0),
                )
                .optional()?;
            return Err(match exists {
                Some(_) => RepositoryError::InvalidStateTransition {
                    from: "resolved".to_string(),
                    to: "resolved".to_string(),
                },
                None => RepositoryError::NotFound {
                    entity: "Issue".to_string(),
                    id: issue_id.to_string(),
                },
            });
        }
        Ok(())
    }

    /// Issues of one scheme, most severe first, oldest first within a severity
    pub fn list_by_scheme(
        &self,
        district_id: &str,
        scheme_id: &str,
        open_only: bool,
    ) -> RepositoryResult<Vec<Issue>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE i.district_id = ?1 AND i.scheme_id = ?2 {} {}",
            SELECT_ISSUE,
            if open_only { "AND i.resolved = 0" } else { "" },
            ORDER_BY_SEVERITY
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![district_id, scheme_id], map_issue)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Issues of every scheme the scope can see
    pub fn list_in_scope(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
        open_only: bool,
    ) -> RepositoryResult<Vec<Issue>> {
        let pred = build_scheme_filter(scope, filter, "s");
        let sql = format!(
            r#"{}
            JOIN schemes s ON s.district_id = i.district_id AND s.scheme_id = i.scheme_id
            WHERE {} {} {}"#,
            SELECT_ISSUE,
            pred.clause,
            if open_only { "AND i.resolved = 0" } else { "" },
            ORDER_BY_SEVERITY
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(pred.params.iter()), map_issue)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Unresolved counts per scheme id for the scope
    pub fn open_counts_in_scope(
        &self,
        scope: &ActorScope,
        filter: &SchemeFilter,
    ) -> RepositoryResult<HashMap<String, OpenIssueCounts>> {
        let pred = build_scheme_filter(scope, filter, "s");
        let sql = format!(
            r#"
            SELECT i.scheme_id, i.severity, i.category
            FROM issues i
            JOIN schemes s ON s.district_id = i.district_id AND s.scheme_id = i.scheme_id
            WHERE i.resolved = 0 AND {}
            "#,
            pred.clause
        );

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(pred.params.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut counts: HashMap<String, OpenIssueCounts> = HashMap::new();
        for row in rows {
            let (scheme_id, severity, category) = row?;
            counts
                .entry(scheme_id)
                .or_default()
                .record(Severity::from_str(&severity), IssueCategory::from_str(&category));
        }
        Ok(counts)
    }
}

const SELECT_ISSUE: &str = r#"
    SELECT i.issue_id, i.district_id, i.scheme_id, i.component_id,
           COALESCE(c.component_name, ''), i.category, i.description, i.severity,
           i.reported_by, i.resolved, i.reported_at, i.expected_resolution_date,
           i.resolved_by, i.resolved_at
    FROM issues i
    LEFT JOIN components c ON c.component_id = i.component_id
"#;

const ORDER_BY_SEVERITY: &str = r#"
    ORDER BY CASE i.severity
        WHEN 'Critical' THEN 0
        WHEN 'High' THEN 1
        WHEN 'Medium' THEN 2
        ELSE 3
    END, i.reported_at, i.issue_id
"#;

fn map_issue(row: &Row<'_>) -> rusqlite::Result<Issue> {
    Ok(Issue {
        issue_id: row.get(0)?,
        district_id: row.get(1)?,
        scheme_id: row.get(2)?,
        component_id: row.get(3)?,
        component_name: row.get(4)?,
        category: IssueCategory::from_str(&row.get::<_, String>(5)?),
        description: row.get(6)?,
        severity: Severity::from_str(&row.get::<_, String>(7)?),
        reported_by: row.get(8)?,
        resolved: row.get(9)?,
        reported_at: parse_db_datetime(row.get(10)?).unwrap_or_default(),
        expected_resolution: parse_db_date(row.get(11)?),
        resolved_by: row.get(12)?,
        resolved_at: parse_db_datetime(row.get(13)?),
    })
}
