use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::config_manager::config_keys;

/// Upper bound for one class's penalty
pub const MAX_PENALTY_DAYS: i64 = 365;

/// Issue class that carries a forecast penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyClass {
    Critical,
    High,
    Material,
    Payment,
    Contractor,
}

impl PenaltyClass {
    pub const ALL: [PenaltyClass; 5] = [
        PenaltyClass::Critical,
        PenaltyClass::High,
        PenaltyClass::Material,
        PenaltyClass::Payment,
        PenaltyClass::Contractor,
    ];

    /// config_kv key (scope_id='global')
    pub fn config_key(&self) -> &'static str {
        match self {
            PenaltyClass::Critical => config_keys::PENALTY_CRITICAL_DAYS,
            PenaltyClass::High => config_keys::PENALTY_HIGH_DAYS,
            PenaltyClass::Material => config_keys::PENALTY_MATERIAL_DAYS,
            PenaltyClass::Payment => config_keys::PENALTY_PAYMENT_DAYS,
            PenaltyClass::Contractor => config_keys::PENALTY_CONTRACTOR_DAYS,
        }
    }

    pub fn default_days(&self) -> i64 {
        match self {
            PenaltyClass::Critical => 14,
            PenaltyClass::High => 7,
            PenaltyClass::Material => 10,
            PenaltyClass::Payment => 21,
            PenaltyClass::Contractor => 14,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Some(PenaltyClass::Critical),
            "high" => Some(PenaltyClass::High),
            "material" => Some(PenaltyClass::Material),
            "payment" => Some(PenaltyClass::Payment),
            "contractor" => Some(PenaltyClass::Contractor),
            _ => None,
        }
    }
}

impl fmt::Display for PenaltyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyClass::Critical => write!(f, "critical"),
            PenaltyClass::High => write!(f, "high"),
            PenaltyClass::Material => write!(f, "material"),
            PenaltyClass::Payment => write!(f, "payment"),
            PenaltyClass::Contractor => write!(f, "contractor"),
        }
    }
}

/// Penalty days per unresolved issue, by class
///
/// Loaded once per request by `ConfigManager::load_delay_penalties`
/// and passed into `IssueDelayModel`; a class missing from the store
/// keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayPenalties {
    pub critical_days: i64,
    pub high_days: i64,
    pub material_days: i64,
    pub payment_days: i64,
    pub contractor_days: i64,
}

impl Default for DelayPenalties {
    fn default() -> Self {
        Self {
            critical_days: PenaltyClass::Critical.default_days(),
            high_days: PenaltyClass::High.default_days(),
            material_days: PenaltyClass::Material.default_days(),
            payment_days: PenaltyClass::Payment.default_days(),
            contractor_days: PenaltyClass::Contractor.default_days(),
        }
    }
}

impl DelayPenalties {
    pub fn get(&self, class: PenaltyClass) -> i64 {
        match class {
            PenaltyClass::Critical => self.critical_days,
            PenaltyClass::High => self.high_days,
            PenaltyClass::Material => self.material_days,
            PenaltyClass::Payment => self.payment_days,
            PenaltyClass::Contractor => self.contractor_days,
        }
    }

    pub fn set(&mut self, class: PenaltyClass, days: i64) {
        match class {
            PenaltyClass::Critical => self.critical_days = days,
            PenaltyClass::High => self.high_days = days,
            PenaltyClass::Material => self.material_days = days,
            PenaltyClass::Payment => self.payment_days = days,
            PenaltyClass::Contractor => self.contractor_days = days,
        }
    }
}
