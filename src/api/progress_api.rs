// ==========================================
// O&M Readiness Tracker - Progress Entry API
// ==========================================
// Catalog listing and per-scheme progress read / save.
// A save batch is validated as a whole before anything is written.
// ==========================================

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{require_district, require_permission, validate_progress_update};
use crate::domain::component::Component;
use crate::domain::progress::{ProgressEntry, ProgressUpdate};
use crate::domain::scheme::Scheme;
use crate::domain::scope::ActorScope;
use crate::domain::types::SiteVariant;
use crate::repository::component_repo::ComponentRepository;
use crate::repository::progress_repo::ProgressRepository;
use crate::repository::scheme_repo::SchemeRepository;

pub struct ProgressApi {
    scheme_repo: Arc<SchemeRepository>,
    component_repo: Arc<ComponentRepository>,
    progress_repo: Arc<ProgressRepository>,
}

impl ProgressApi {
    pub fn new(
        scheme_repo: Arc<SchemeRepository>,
        component_repo: Arc<ComponentRepository>,
        progress_repo: Arc<ProgressRepository>,
    ) -> Self {
        Self {
            scheme_repo,
            component_repo,
            progress_repo,
        }
    }

    /// Catalog items of one site variant
    pub fn list_components(&self, site: SiteVariant) -> ApiResult<Vec<Component>> {
        Ok(self.component_repo.list_by_site(site)?)
    }

    /// Scheme visible to the actor; out-of-scope reads as not found
    fn scheme_in_scope(&self, scope: &ActorScope, scheme_id: &str) -> ApiResult<Scheme> {
        require_district(scope)?;
        self.scheme_repo
            .find_by_id(scope, scheme_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Scheme(id={})", scheme_id)))
    }

    pub fn get_entries(&self, scope: &ActorScope, scheme_id: &str) -> ApiResult<Vec<ProgressEntry>> {
        let scheme = self.scheme_in_scope(scope, scheme_id)?;
        Ok(self
            .progress_repo
            .find_by_scheme(&scheme.district_id, &scheme.scheme_id)?)
    }

    /// Validate and upsert a batch; returns the number of rows written
    pub fn save_entries(
        &self,
        scope: &ActorScope,
        scheme_id: &str,
        updates: &[ProgressUpdate],
    ) -> ApiResult<usize> {
        require_permission(scope, scope.role.can_enter_data(), "enter progress")?;
        let scheme = self.scheme_in_scope(scope, scheme_id)?;

        if updates.is_empty() {
            return Ok(0);
        }

        let mut seen = HashSet::new();
        for update in updates {
            if !seen.insert(update.component_id) {
                return Err(ApiError::InvalidInput(format!(
                    "component {} appears more than once",
                    update.component_id
                )));
            }

            let component = self
                .component_repo
                .find_by_id(update.component_id)?
                .ok_or_else(|| ApiError::NotFound(format!("Component(id={})", update.component_id)))?;

            if component.site == SiteVariant::Secondary && !scheme.has_secondary_site {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "scheme {} has no TW-2 site (component {})",
                    scheme.scheme_id, component.component_id
                )));
            }

            validate_progress_update(update, &component)?;
        }

        let written = self.progress_repo.upsert_batch(
            &scheme.district_id,
            &scheme.scheme_id,
            updates,
            Utc::now().naive_utc(),
        )?;

        tracing::info!(
            actor = %scope.actor,
            scheme_id = %scheme.scheme_id,
            written,
            "progress saved"
        );
        Ok(written)
    }
}
