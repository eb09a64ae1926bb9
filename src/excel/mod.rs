//! Workbook I/O boundary.
//!
//! - Import: two-tab workbook (.xlsx/.xls) → [`crate::types::ReportTable`]
//! - Export: tidy table + pacing → .xlsx or .json for downstream consumers

mod exporter;
mod importer;

pub use exporter::TableExporter;
pub use importer::WorkbookImporter;
