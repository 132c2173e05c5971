// ==========================================
// O&M Readiness Tracker - Configuration API
// ==========================================
// Delay penalties and default buffer are process-wide ('global');
// the company name is a per-district display setting.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    require_district, require_non_empty, require_permission, validate_buffer_days,
    validate_penalty_days,
};
use crate::config::config_manager::ConfigManager;
use crate::config::delay_penalties::{DelayPenalties, PenaltyClass};
use crate::domain::scope::ActorScope;

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    pub fn get_delay_penalties(&self) -> ApiResult<DelayPenalties> {
        Ok(self.config_manager.load_delay_penalties()?)
    }

    /// Update one penalty class, e.g. `("payment", 30)`
    pub fn update_delay_penalty(&self, scope: &ActorScope, class: &str, days: i64) -> ApiResult<DelayPenalties> {
        require_permission(scope, scope.role.can_edit_penalties(), "edit delay penalties")?;
        let class = PenaltyClass::from_str(class)
            .ok_or_else(|| ApiError::InvalidInput(format!("unknown penalty class: {}", class)))?;
        validate_penalty_days(days)?;

        self.config_manager.update_delay_penalty(class, days)?;
        tracing::info!(actor = %scope.actor, class = %class, days, "penalty changed");
        self.get_delay_penalties()
    }

    pub fn get_default_buffer_days(&self) -> ApiResult<i64> {
        Ok(self.config_manager.get_default_buffer_days()?)
    }

    pub fn set_default_buffer_days(&self, scope: &ActorScope, days: i64) -> ApiResult<()> {
        require_permission(scope, scope.role.can_administer(), "change the default buffer")?;
        validate_buffer_days(days)?;
        self.config_manager.set_default_buffer_days(days)?;
        tracing::info!(actor = %scope.actor, days, "default buffer changed");
        Ok(())
    }

    pub fn get_company_name(&self, scope: &ActorScope) -> ApiResult<String> {
        let district_id = require_district(scope)?;
        Ok(self.config_manager.get_company_name(district_id)?)
    }

    pub fn set_company_name(&self, scope: &ActorScope, name: &str) -> ApiResult<()> {
        require_permission(scope, scope.role.can_manage_district(), "edit district settings")?;
        let district_id = require_district(scope)?;
        let name = require_non_empty("company_name", name)?;
        self.config_manager.set_company_name(district_id, name)?;
        tracing::info!(actor = %scope.actor, district_id, "company name changed");
        Ok(())
    }
}
