// ==========================================
// O&M Readiness Tracker - Actor Scope
// ==========================================
// Supplied by the external identity resolver; consumed as a value.
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorScope {
    pub actor: String,
    pub role: Role,
    /// None only for Admin (every district)
    pub district_id: Option<String>,
    /// Restrict to these administrative blocks
    pub blocks: Option<Vec<String>>,
    /// Restrict to one implementing agency
    pub agency: Option<String>,
}

impl ActorScope {
    pub fn admin(actor: &str) -> Self {
        Self {
            actor: actor.to_string(),
            role: Role::Admin,
            district_id: None,
            blocks: None,
            agency: None,
        }
    }

    /// Full view of one district
    pub fn district(actor: &str, role: Role, district_id: &str) -> Self {
        Self {
            actor: actor.to_string(),
            role,
            district_id: Some(district_id.to_string()),
            blocks: None,
            agency: None,
        }
    }

    pub fn with_blocks(mut self, blocks: &[&str]) -> Self {
        self.blocks = Some(blocks.iter().map(|b| b.to_string()).collect());
        self
    }

    pub fn with_agency(mut self, agency: &str) -> Self {
        self.agency = Some(agency.to_string());
        self
    }
}

/// Optional report-time narrowing on top of the actor scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeFilter {
    pub block: Option<String>,
    pub agency: Option<String>,
}
