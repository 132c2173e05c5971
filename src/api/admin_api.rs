// ==========================================
// O&M Readiness Tracker - Administration API
// ==========================================
// District lifecycle and system-wide statistics. Admin only.
// ==========================================

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_non_empty, require_permission};
use crate::domain::district::{District, NewDistrict};
use crate::domain::scope::ActorScope;
use crate::repository::district_repo::{DistrictRepository, WipeCounts};
use crate::repository::scheme_repo::SchemeRepository;

#[derive(Debug, Clone, Serialize)]
pub struct DistrictSchemeCount {
    pub district_id: String,
    pub district_name: String,
    pub scheme_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemStatistics {
    pub active_districts: i64,
    pub total_schemes: i64,
    pub schemes_per_district: Vec<DistrictSchemeCount>, // active districts, most schemes first
}

pub struct AdminApi {
    district_repo: Arc<DistrictRepository>,
    scheme_repo: Arc<SchemeRepository>,
}

impl AdminApi {
    pub fn new(district_repo: Arc<DistrictRepository>, scheme_repo: Arc<SchemeRepository>) -> Self {
        Self {
            district_repo,
            scheme_repo,
        }
    }

    fn require_admin(scope: &ActorScope, action: &str) -> ApiResult<()> {
        require_permission(scope, scope.role.can_administer(), action)
    }

    fn optional(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn create_district(&self, scope: &ActorScope, input: &NewDistrict) -> ApiResult<District> {
        Self::require_admin(scope, "create districts")?;
        let name = require_non_empty("district_name", &input.district_name)?;
        let code = require_non_empty("district_code", &input.district_code)?.to_ascii_uppercase();

        if self.district_repo.find_by_code(&code)?.is_some() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "district code {} already exists",
                code
            )));
        }

        let district = District {
            district_id: Uuid::new_v4().to_string(),
            district_name: name.to_string(),
            district_code: code,
            contact_person: Self::optional(&input.contact_person),
            contact_email: Self::optional(&input.contact_email),
            contact_phone: Self::optional(&input.contact_phone),
            is_active: true,
            created_at: Utc::now().naive_utc(),
        };
        self.district_repo.insert(&district)?;

        tracing::info!(
            actor = %scope.actor,
            district_id = %district.district_id,
            district_code = %district.district_code,
            "district created"
        );
        Ok(district)
    }

    pub fn list_districts(&self, scope: &ActorScope) -> ApiResult<Vec<District>> {
        Self::require_admin(scope, "list districts")?;
        Ok(self.district_repo.list_all()?)
    }

    pub fn set_district_active(&self, scope: &ActorScope, district_id: &str, active: bool) -> ApiResult<District> {
        Self::require_admin(scope, "change district status")?;
        let not_found = || ApiError::NotFound(format!("District(id={})", district_id));

        if !self.district_repo.set_active(district_id, active)? {
            return Err(not_found());
        }
        tracing::info!(actor = %scope.actor, district_id, active, "district status changed");

        self.district_repo.find_by_id(district_id)?.ok_or_else(not_found)
    }

    /// Permanently delete a district and all of its data
    pub fn wipe_district(&self, scope: &ActorScope, district_id: &str) -> ApiResult<WipeCounts> {
        Self::require_admin(scope, "wipe districts")?;
        let counts = self.district_repo.wipe(district_id)?;
        tracing::warn!(
            actor = %scope.actor,
            district_id,
            schemes = counts.schemes,
            progress = counts.progress,
            issues = counts.issues,
            "district wiped"
        );
        Ok(counts)
    }

    pub fn system_statistics(&self, scope: &ActorScope) -> ApiResult<SystemStatistics> {
        Self::require_admin(scope, "view system statistics")?;

        let mut per_district: Vec<DistrictSchemeCount> = self
            .scheme_repo
            .count_by_active_district()?
            .into_iter()
            .map(|(district_id, district_name, scheme_count)| DistrictSchemeCount {
                district_id,
                district_name,
                scheme_count,
            })
            .collect();
        per_district.sort_by(|a, b| {
            b.scheme_count
                .cmp(&a.scheme_count)
                .then_with(|| a.district_name.cmp(&b.district_name))
        });

        Ok(SystemStatistics {
            active_districts: self.district_repo.count_active()?,
            total_schemes: self.scheme_repo.count_all()?,
            schemes_per_district: per_district,
        })
    }
}
