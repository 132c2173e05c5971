// ==========================================
// O&M Readiness Tracker - Scheme Import API
// ==========================================
// Replace-all import of the actor's district scheme list, and the
// matching "clear district data" action.
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::api::error::ApiResult;
use crate::api::validator::{require_district, require_permission};
use crate::domain::scope::ActorScope;
use crate::importer::{SchemeImportSummary, SchemeImporter};
use crate::repository::scheme_repo::{ReplaceCounts, SchemeRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    pub imported: usize,
    pub secondary_sites: usize,
    pub skipped_rows: Vec<usize>,
    pub duplicate_ids: usize,
    pub removed_schemes: usize,
    pub elapsed_ms: i64,
}

impl ImportApiResponse {
    fn from_summary(summary: SchemeImportSummary, elapsed_ms: i64) -> Self {
        Self {
            imported: summary.imported,
            secondary_sites: summary.secondary_sites,
            skipped_rows: summary.skipped_rows,
            duplicate_ids: summary.duplicate_ids,
            removed_schemes: summary.replaced.removed_schemes,
            elapsed_ms,
        }
    }
}

pub struct ImportApi {
    importer: Arc<dyn SchemeImporter>,
    scheme_repo: Arc<SchemeRepository>,
}

impl ImportApi {
    pub fn new(importer: Arc<dyn SchemeImporter>, scheme_repo: Arc<SchemeRepository>) -> Self {
        Self {
            importer,
            scheme_repo,
        }
    }

    /// Replace the district's schemes with the file contents
    pub async fn import_schemes(&self, scope: &ActorScope, file_path: &Path) -> ApiResult<ImportApiResponse> {
        require_permission(scope, scope.role.can_manage_district(), "import schemes")?;
        let district_id = require_district(scope)?;

        let started = Instant::now();
        let summary = self.importer.import_file(district_id, file_path).await?;
        let elapsed_ms = started.elapsed().as_millis() as i64;

        tracing::info!(
            actor = %scope.actor,
            district_id,
            imported = summary.imported,
            elapsed_ms,
            "scheme import finished"
        );
        Ok(ImportApiResponse::from_summary(summary, elapsed_ms))
    }

    /// Remove every scheme, progress row and issue of the district
    pub fn clear_district_data(&self, scope: &ActorScope) -> ApiResult<ReplaceCounts> {
        require_permission(scope, scope.role.can_manage_district(), "clear district data")?;
        let district_id = require_district(scope)?;

        let counts = self.scheme_repo.replace_all(district_id, &[])?;
        tracing::warn!(
            actor = %scope.actor,
            district_id,
            schemes = counts.removed_schemes,
            "district data cleared"
        );
        Ok(counts)
    }
}
