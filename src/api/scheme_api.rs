// ==========================================
// O&M Readiness Tracker - Scheme API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_district, require_permission, validate_verification_dates};
use crate::domain::scheme::{Scheme, VerificationDates};
use crate::domain::scope::{ActorScope, SchemeFilter};
use crate::repository::scheme_repo::SchemeRepository;

pub struct SchemeApi {
    scheme_repo: Arc<SchemeRepository>,
}

impl SchemeApi {
    pub fn new(scheme_repo: Arc<SchemeRepository>) -> Self {
        Self { scheme_repo }
    }

    /// Schemes visible to the actor (Admin without a district sees all)
    pub fn list_schemes(&self, scope: &ActorScope, filter: &SchemeFilter) -> ApiResult<Vec<Scheme>> {
        Ok(self.scheme_repo.find_in_scope(scope, filter)?)
    }

    pub fn get_scheme(&self, scope: &ActorScope, scheme_id: &str) -> ApiResult<Scheme> {
        require_district(scope)?;
        self.scheme_repo
            .find_by_id(scope, scheme_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Scheme(id={})", scheme_id)))
    }

    /// Replace the three sign-off dates of a scheme
    pub fn update_verification_dates(
        &self,
        scope: &ActorScope,
        scheme_id: &str,
        dates: VerificationDates,
    ) -> ApiResult<Scheme> {
        require_permission(scope, scope.role.can_manage_district(), "edit verification dates")?;
        validate_verification_dates(&dates)?;

        let scheme = self.get_scheme(scope, scheme_id)?;
        self.scheme_repo
            .update_verification(&scheme.district_id, &scheme.scheme_id, &dates)?;

        tracing::info!(
            actor = %scope.actor,
            scheme_id,
            engineer_verified = ?dates.engineer_verified,
            "verification dates updated"
        );

        Ok(Scheme {
            verification: dates,
            ..scheme
        })
    }
}
