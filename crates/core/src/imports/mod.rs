//! Imports module - batch jobs that seed the schema from spreadsheets.
//!
//! Every known source layout is described by a static column table
//! ([`SourceFormat::columns`]). A sheet is checked against that table before
//! any row is read, so a file with the wrong layout is rejected up front with
//! the complete list of missing (and, for strict layouts, unexpected) columns.
//! Rows are then processed one at a time; a row that cannot be mapped or
//! written is logged, counted as skipped, and does not stop the job.

mod client_sheet;
mod column_mapping;
mod imports_errors;
mod imports_model;
mod imports_service;
mod imports_service_tests;
mod persona;
mod reference_data;
mod sheet;
mod synthetic;
mod transaction_sheet;

pub use client_sheet::client_seed_from_row;
pub use column_mapping::{normalize_header, ColumnMap, ColumnSpec, MappedRow, SourceFormat};
pub use imports_errors::ImportError;
pub use imports_model::{ImportSummary, ReferenceSeedSummary, RowFailure, TransactionImportSummary};
pub use imports_service::{ImportService, SeedPlan};
pub use persona::{persona_seed_from_row, risk_code_label};
pub use reference_data::{demo_client_seeds, glossary_seed, market_insight_seed};
pub use sheet::{read_sheet, read_sheet_file, SheetKind, SheetTable};
pub use synthetic::{monthly_trend, random_walk, AllocationMix, PERFORMANCE_MONTHS, PERFORMANCE_START};
pub use transaction_sheet::transaction_from_row;
