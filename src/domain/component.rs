// ==========================================
// O&M Readiness Tracker - Component
// ==========================================
// One checklist line item of construction work.
// Immutable reference data shared by every district.
// ==========================================

use crate::domain::types::{EntryKind, SiteVariant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub component_id: i64,
    pub name: String,
    pub group: String,         // structural category, e.g. "OHT"
    pub site: SiteVariant,
    pub kind: EntryKind,
    pub unit: Option<String>,  // "Km", "Nos.", "%"
}
