// ==========================================
// O&M Readiness Tracker - SQLite Bootstrap
// ==========================================
// - one place for the per-connection PRAGMAs (foreign_keys, busy_timeout)
// - idempotent schema creation + schema_version record
// - one-time seeding of the component catalog
// ==========================================

use crate::engine::catalog::DEFAULT_COMPONENTS;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::OptionalExtension;
use rusqlite::{params, Connection};
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Storage format for dates and timestamps
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored date; malformed values read as None
pub fn parse_db_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
}

/// Parse a stored timestamp; malformed values read as None
pub fn parse_db_datetime(raw: Option<String>) -> Option<NaiveDateTime> {
    raw.and_then(|s| NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT).ok())
}

pub fn format_db_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

pub fn format_db_datetime(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Apply the per-connection PRAGMAs
///
/// foreign_keys and busy_timeout are per connection in SQLite and
/// must be set on every open.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection with the shared configuration applied
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Read schema_version; None when the table does not exist
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Create every table (IF NOT EXISTS) and record the schema version
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS districts (
            district_id TEXT PRIMARY KEY,
            district_name TEXT NOT NULL,
            district_code TEXT NOT NULL UNIQUE,
            contact_person TEXT,
            contact_email TEXT,
            contact_phone TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS components (
            component_id INTEGER PRIMARY KEY,
            component_name TEXT NOT NULL,
            component_group TEXT NOT NULL,
            site_type TEXT NOT NULL,
            entry_type TEXT NOT NULL,
            unit TEXT,
            UNIQUE (component_name, site_type)
        );

        CREATE TABLE IF NOT EXISTS schemes (
            scheme_id TEXT NOT NULL,
            district_id TEXT NOT NULL REFERENCES districts(district_id),
            sr_no INTEGER,
            block TEXT NOT NULL,
            agency TEXT NOT NULL,
            scheme_name TEXT NOT NULL,
            has_secondary_site INTEGER NOT NULL DEFAULT 0,
            agency_submitted_date TEXT,
            tpia_verified_date TEXT,
            ee_verified_date TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (district_id, scheme_id)
        );

        CREATE TABLE IF NOT EXISTS progress (
            progress_id INTEGER PRIMARY KEY,
            district_id TEXT NOT NULL,
            scheme_id TEXT NOT NULL,
            component_id INTEGER NOT NULL REFERENCES components(component_id),
            target_value REAL,
            achieved_value REAL,
            progress_percent REAL NOT NULL DEFAULT 0,
            days_remaining INTEGER NOT NULL DEFAULT 0,
            remarks TEXT,
            last_updated TEXT,
            UNIQUE (district_id, scheme_id, component_id),
            FOREIGN KEY (district_id, scheme_id)
                REFERENCES schemes(district_id, scheme_id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS issues (
            issue_id TEXT PRIMARY KEY,
            district_id TEXT NOT NULL,
            scheme_id TEXT NOT NULL,
            component_id INTEGER NOT NULL REFERENCES components(component_id),
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            severity TEXT NOT NULL,
            reported_by TEXT NOT NULL,
            resolved INTEGER NOT NULL DEFAULT 0,
            reported_at TEXT NOT NULL,
            expected_resolution_date TEXT,
            resolved_by TEXT,
            resolved_at TEXT,
            FOREIGN KEY (district_id, scheme_id)
                REFERENCES schemes(district_id, scheme_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_schemes_block ON schemes(district_id, block);
        CREATE INDEX IF NOT EXISTS idx_schemes_agency ON schemes(district_id, agency);
        CREATE INDEX IF NOT EXISTS idx_issues_open ON issues(district_id, scheme_id, resolved);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Seed the component catalog when the table is empty
///
/// # Returns
/// Number of inserted components (0 when already seeded)
pub fn seed_components(conn: &Connection) -> rusqlite::Result<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM components", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    for item in DEFAULT_COMPONENTS {
        tx.execute(
            r#"
            INSERT INTO components (component_name, component_group, site_type, entry_type, unit)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                item.name,
                item.group,
                item.site.to_db_str(),
                item.kind.to_db_str(),
                item.unit
            ],
        )?;
    }
    tx.commit()?;

    tracing::info!(count = DEFAULT_COMPONENTS.len(), "component catalog seeded");
    Ok(DEFAULT_COMPONENTS.len())
}

/// Open, configure, create schema and seed the catalog in one call
pub fn open_and_prepare(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    seed_components(&conn)?;

    if let Some(version) = read_schema_version(&conn)? {
        if version > CURRENT_SCHEMA_VERSION {
            tracing::warn!(
                db_version = version,
                expected = CURRENT_SCHEMA_VERSION,
                "database schema is newer than this build"
            );
        }
    }
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_and_seed_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));

        assert_eq!(seed_components(&conn).unwrap(), DEFAULT_COMPONENTS.len());
        assert_eq!(seed_components(&conn).unwrap(), 0);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM components", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count as usize, DEFAULT_COMPONENTS.len());
    }
}
