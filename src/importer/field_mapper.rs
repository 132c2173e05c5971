// ==========================================
// O&M Readiness Tracker - Scheme Field Mapper
// ==========================================
// Header row: first row (of the first HEADER_SCAN_ROWS) whose text
// contains "block", "agency" and "scheme". The five columns after it
// are positional: sr_no, block, agency, scheme_name, scheme_id.
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};

pub const HEADER_SCAN_ROWS: usize = 10;
const MAPPED_COLUMNS: usize = 5;

/// One mapped, cleaned scheme row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeRow {
    pub row_number: usize, // 1-based, as shown in the spreadsheet
    pub sr_no: i64,
    pub block: String,
    pub agency: String,
    pub scheme_name: String,
    pub scheme_id: String,
    pub has_secondary_site: bool,
}

/// Mapping outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRows {
    pub header_row: usize,
    pub rows: Vec<SchemeRow>,
    pub skipped: Vec<usize>,
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self { cleaner: DataCleaner }
    }

    /// Index of the header row within `rows`
    pub fn find_header_row(&self, rows: &[Vec<String>]) -> Option<usize> {
        rows.iter().take(HEADER_SCAN_ROWS).position(|row| {
            let text = row.join(" ").to_lowercase();
            text.contains("block") && text.contains("agency") && text.contains("scheme")
        })
    }

    pub fn map_rows(&self, rows: &[Vec<String>]) -> ImportResult<MappedRows> {
        let header_row = self
            .find_header_row(rows)
            .ok_or(ImportError::HeaderNotFound {
                scanned: HEADER_SCAN_ROWS.min(rows.len()),
            })?;

        let mut mapped = MappedRows {
            header_row,
            ..Default::default()
        };

        for (idx, row) in rows.iter().enumerate().skip(header_row + 1) {
            let row_number = idx + 1;
            match self.map_row(row, row_number) {
                Some(r) => mapped.rows.push(r),
                None => mapped.skipped.push(row_number),
            }
        }

        Ok(mapped)
    }

    /// None when any of the five mapped cells is missing
    fn map_row(&self, row: &[String], row_number: usize) -> Option<SchemeRow> {
        let cells: Vec<&str> = (0..MAPPED_COLUMNS)
            .map(|i| row.get(i).map(|c| c.trim()).unwrap_or(""))
            .collect();
        if cells.iter().any(|c| c.is_empty()) {
            return None;
        }

        let sr_no = self.cleaner.parse_sr_no(cells[0])?;
        let (scheme_name, has_secondary_site) = self.cleaner.clean_scheme_name(cells[3]);
        if scheme_name.is_empty() {
            return None;
        }

        Some(SchemeRow {
            row_number,
            sr_no,
            block: cells[1].to_string(),
            agency: cells[2].to_string(),
            scheme_name,
            scheme_id: self.cleaner.clean_scheme_id(cells[4]),
            has_secondary_site,
        })
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}
