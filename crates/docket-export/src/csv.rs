//! # CSV Exporter
//!
//! Serializes the item table to UTF-8 delimited text: one header row with
//! the column names, one row per item including the derived line-total
//! column. Totals and header fields are not part of the CSV payload; it is
//! the raw item table, suitable for re-import into a spreadsheet.

use docket_core::Document;

use crate::error::{ExportError, ExportResult};
use crate::table;

/// Exports the document's item table as CSV bytes.
///
/// Pure: no shared state, no side effects.
///
/// ## Example
/// ```rust,ignore
/// let bytes = export_csv(&doc)?;
/// std::fs::write(table::export_filename(&doc.doc_no, "csv"), bytes)?;
/// ```
pub fn export_csv(doc: &Document) -> ExportResult<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    writer.write_record(table::ITEM_COLUMNS)?;
    for row in table::item_rows(doc) {
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::CsvBuffer(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
