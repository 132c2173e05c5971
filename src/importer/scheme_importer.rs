// ==========================================
// O&M Readiness Tracker - Scheme Importer
// ==========================================
// Pipeline:
// 1. parse file into raw rows (csv / calamine)
// 2. locate header, map positional columns, clean names
// 3. replace the district's schemes in one transaction
//    (progress and issues of the old list are removed with it)
// ==========================================

use crate::domain::scheme::{Scheme, VerificationDates};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, SchemeRow};
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::scheme_repo::{ReplaceCounts, SchemeRepository};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SchemeImportSummary {
    pub district_id: String,
    pub header_row: usize,        // 1-based
    pub imported: usize,
    pub secondary_sites: usize,
    pub skipped_rows: Vec<usize>, // 1-based row numbers
    pub duplicate_ids: usize,     // later rows replaced earlier ones
    pub replaced: ReplaceCounts,
}

#[async_trait]
pub trait SchemeImporter: Send + Sync {
    /// Replace-all import of one district's scheme list
    async fn import_file(&self, district_id: &str, file_path: &Path) -> ImportResult<SchemeImportSummary>;
}

pub struct SchemeImporterImpl {
    scheme_repo: Arc<SchemeRepository>,
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl SchemeImporterImpl {
    pub fn new(scheme_repo: Arc<SchemeRepository>) -> Self {
        Self {
            scheme_repo,
            parser: UniversalFileParser,
            mapper: FieldMapper::new(),
        }
    }

    /// Collapse duplicate ids, keeping the last occurrence in its first position
    fn dedupe(rows: Vec<SchemeRow>) -> (Vec<SchemeRow>, usize) {
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<SchemeRow> = Vec::with_capacity(rows.len());
        let mut duplicates = 0;

        for row in rows {
            match position.get(&row.scheme_id) {
                Some(&idx) => {
                    unique[idx] = row;
                    duplicates += 1;
                }
                None => {
                    position.insert(row.scheme_id.clone(), unique.len());
                    unique.push(row);
                }
            }
        }
        (unique, duplicates)
    }
}

#[async_trait]
impl SchemeImporter for SchemeImporterImpl {
    #[instrument(skip(self, file_path), fields(path = %file_path.display()))]
    async fn import_file(&self, district_id: &str, file_path: &Path) -> ImportResult<SchemeImportSummary> {
        let raw_rows = self.parser.parse(file_path)?;
        let mapped = self.mapper.map_rows(&raw_rows)?;

        if !mapped.skipped.is_empty() {
            warn!(skipped = mapped.skipped.len(), "rows with missing fields skipped");
        }

        let (rows, duplicate_ids) = Self::dedupe(mapped.rows);
        if rows.is_empty() {
            return Err(ImportError::NoRows);
        }

        let schemes: Vec<Scheme> = rows
            .into_iter()
            .map(|r| Scheme {
                scheme_id: r.scheme_id,
                district_id: district_id.to_string(),
                sr_no: Some(r.sr_no),
                block: r.block,
                agency: r.agency,
                scheme_name: r.scheme_name,
                has_secondary_site: r.has_secondary_site,
                verification: VerificationDates::default(),
            })
            .collect();

        let replaced = self.scheme_repo.replace_all(district_id, &schemes)?;

        let summary = SchemeImportSummary {
            district_id: district_id.to_string(),
            header_row: mapped.header_row + 1,
            imported: schemes.len(),
            secondary_sites: schemes.iter().filter(|s| s.has_secondary_site).count(),
            skipped_rows: mapped.skipped,
            duplicate_ids,
            replaced,
        };

        info!(
            district_id,
            imported = summary.imported,
            removed = summary.replaced.removed_schemes,
            "scheme list replaced"
        );
        Ok(summary)
    }
}
