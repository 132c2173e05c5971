// ==========================================
// O&M Readiness Tracker - Configuration Layer
// ==========================================
// Storage: config_kv table (key-value + scope)
// ==========================================

pub mod config_manager;
pub mod delay_penalties;

pub use config_manager::{config_keys, ConfigManager, ConfigScope, DEFAULT_COMPANY_NAME};
pub use delay_penalties::{DelayPenalties, PenaltyClass, MAX_PENALTY_DAYS};
