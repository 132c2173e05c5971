// ==========================================
// O&M Readiness Tracker - Configuration Manager
// ==========================================
// Storage: config_kv (scope_id, key, value, updated_at)
// - 'global'          delay penalties, default buffer
// - 'district:{id}'   per-district display settings
// Unparseable or missing values fall back to defaults with a warning.
// ==========================================

use crate::config::delay_penalties::{DelayPenalties, PenaltyClass, MAX_PENALTY_DAYS};
use crate::db::open_sqlite_connection;
use crate::engine::forecast::{DEFAULT_BUFFER_DAYS, MAX_BUFFER_DAYS};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

/// Display name used when a district never set its own
pub const DEFAULT_COMPANY_NAME: &str = "JJM Implementation Agency";

// ==========================================
// ConfigScope
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,
    District(String),
}

impl ConfigScope {
    pub fn scope_id(&self) -> String {
        match self {
            ConfigScope::Global => "global".to_string(),
            ConfigScope::District(id) => format!("district:{}", id),
        }
    }
}

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Open a dedicated connection to `db_path`
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection (PRAGMAs re-applied, idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Raw value; None when the key is absent
    pub fn get_config_value(&self, scope: &ConfigScope, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope.scope_id(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_config_or_default(
        &self,
        scope: &ConfigScope,
        key: &str,
        default: &str,
    ) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(scope, key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Upsert one value
    pub fn set_config_value(&self, scope: &ConfigScope, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![scope.scope_id(), key, value],
        )?;
        Ok(())
    }

    /// Drop every key of one scope; returns the number of removed rows
    pub fn delete_scope(&self, scope: &ConfigScope) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1",
            params![scope.scope_id()],
        )?;
        Ok(n)
    }

    // ===== Delay penalties =====

    /// Current penalty table; each class falls back independently
    pub fn load_delay_penalties(&self) -> RepositoryResult<DelayPenalties> {
        let mut penalties = DelayPenalties::default();

        for class in PenaltyClass::ALL {
            let Some(raw) = self.get_config_value(&ConfigScope::Global, class.config_key())? else {
                continue;
            };
            match raw.trim().parse::<i64>() {
                Ok(days) if (0..=MAX_PENALTY_DAYS).contains(&days) => penalties.set(class, days),
                _ => tracing::warn!(
                    config_key = class.config_key(),
                    raw_value = %raw,
                    default = class.default_days(),
                    "invalid penalty value, using default"
                ),
            }
        }

        Ok(penalties)
    }

    /// Persist one penalty within 0..=MAX_PENALTY_DAYS
    pub fn update_delay_penalty(&self, class: PenaltyClass, days: i64) -> RepositoryResult<()> {
        if !(0..=MAX_PENALTY_DAYS).contains(&days) {
            return Err(RepositoryError::FieldValueError {
                field: class.config_key().to_string(),
                message: format!("penalty must be within 0..={}, got {}", MAX_PENALTY_DAYS, days),
            });
        }
        self.set_config_value(&ConfigScope::Global, class.config_key(), &days.to_string())?;
        tracing::info!(class = %class, days, "delay penalty updated");
        Ok(())
    }

    // ===== Forecast buffer =====

    pub fn get_default_buffer_days(&self) -> RepositoryResult<i64> {
        let value = self.get_config_or_default(
            &ConfigScope::Global,
            config_keys::DEFAULT_BUFFER_DAYS,
            &DEFAULT_BUFFER_DAYS.to_string(),
        )?;

        match value.trim().parse::<i64>() {
            Ok(days) if (0..=MAX_BUFFER_DAYS).contains(&days) => Ok(days),
            _ => {
                tracing::warn!(
                    config_key = config_keys::DEFAULT_BUFFER_DAYS,
                    raw_value = %value,
                    "invalid buffer value, using default"
                );
                Ok(DEFAULT_BUFFER_DAYS)
            }
        }
    }

    pub fn set_default_buffer_days(&self, days: i64) -> RepositoryResult<()> {
        if !(0..=MAX_BUFFER_DAYS).contains(&days) {
            return Err(RepositoryError::FieldValueError {
                field: config_keys::DEFAULT_BUFFER_DAYS.to_string(),
                message: format!("buffer must be within 0..={}, got {}", MAX_BUFFER_DAYS, days),
            });
        }
        self.set_config_value(
            &ConfigScope::Global,
            config_keys::DEFAULT_BUFFER_DAYS,
            &days.to_string(),
        )
    }

    // ===== District settings =====

    pub fn get_company_name(&self, district_id: &str) -> RepositoryResult<String> {
        let value = self.get_config_or_default(
            &ConfigScope::District(district_id.to_string()),
            config_keys::COMPANY_NAME,
            DEFAULT_COMPANY_NAME,
        )?;
        if value.trim().is_empty() {
            return Ok(DEFAULT_COMPANY_NAME.to_string());
        }
        Ok(value)
    }

    pub fn set_company_name(&self, district_id: &str, name: &str) -> RepositoryResult<()> {
        self.set_config_value(
            &ConfigScope::District(district_id.to_string()),
            config_keys::COMPANY_NAME,
            name.trim(),
        )
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // global
    pub const PENALTY_CRITICAL_DAYS: &str = "penalty_critical_days";
    pub const PENALTY_HIGH_DAYS: &str = "penalty_high_days";
    pub const PENALTY_MATERIAL_DAYS: &str = "penalty_material_days";
    pub const PENALTY_PAYMENT_DAYS: &str = "penalty_payment_days";
    pub const PENALTY_CONTRACTOR_DAYS: &str = "penalty_contractor_days";
    pub const DEFAULT_BUFFER_DAYS: &str = "default_buffer_days";

    // district:{id}
    pub const COMPANY_NAME: &str = "company_name";
}
