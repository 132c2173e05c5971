// ==========================================
// O&M Readiness Tracker - Import Layer
// ==========================================
// Scheme lists from district spreadsheets (Excel / CSV)
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod scheme_importer;

pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, MappedRows, SchemeRow, HEADER_SCAN_ROWS};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
pub use scheme_importer::{SchemeImportSummary, SchemeImporter, SchemeImporterImpl};
