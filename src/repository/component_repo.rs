// ==========================================
// O&M Readiness Tracker - Component Repository
// ==========================================
// Read-only access to the seeded catalog.
// ==========================================

use crate::domain::component::Component;
use crate::domain::types::{EntryKind, SiteVariant};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ComponentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Components of one site variant in checklist order
    pub fn list_by_site(&self, site: SiteVariant) -> RepositoryResult<Vec<Component>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE site_type = ?1 ORDER BY component_id",
            SELECT_COMPONENT
        ))?;
        let rows = stmt
            .query_map(params![site.to_db_str()], map_component)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn find_by_id(&self, component_id: i64) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let component = conn
            .query_row(
                &format!("{} WHERE component_id = ?1", SELECT_COMPONENT),
                params![component_id],
                map_component,
            )
            .optional()?;
        Ok(component)
    }
}

const SELECT_COMPONENT: &str = r#"
    SELECT component_id, component_name, component_group, site_type, entry_type, unit
    FROM components
"#;

fn map_component(row: &Row<'_>) -> rusqlite::Result<Component> {
    Ok(Component {
        component_id: row.get(0)?,
        name: row.get(1)?,
        group: row.get(2)?,
        site: SiteVariant::from_str(&row.get::<_, String>(3)?),
        kind: EntryKind::from_str(&row.get::<_, String>(4)?),
        unit: row.get(5)?,
    })
}
