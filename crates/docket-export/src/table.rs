//! # Export Data Shaping
//!
//! The shared tabular view of a document's items, used by all three
//! exporters so the CSV columns, the HTML table, and the PDF table always
//! agree on content.
//!
//! Numbers are rendered locale-independently: quantities as plain decimals
//! (`1`, `1.5`), money always with 2 decimals (`250.00`). Display-grade
//! formatting with thousands separators stays in the HTML/PDF renderers.

use docket_core::Document;

/// Column names of the item table, in order.
pub const ITEM_COLUMNS: [&str; 5] = ["Description", "Qty", "Unit", "Unit Price", "Line Total"];

/// Renders one table row per item: description, quantity, unit, unit price,
/// derived line total.
pub fn item_rows(doc: &Document) -> Vec<[String; 5]> {
    doc.items
        .iter()
        .map(|item| {
            [
                item.description.clone(),
                format_quantity(item.quantity),
                item.unit.clone(),
                format!("{:.2}", item.unit_price),
                format!("{:.2}", item.line_total),
            ]
        })
        .collect()
}

/// Renders a quantity without trailing noise: `1` not `1.00`, `1.5` as is.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// Builds the download filename for a document, `{docNo}.{ext}`.
///
/// The document number is filesystem-safe by construction, but the name is
/// sanitized anyway since the doc_no field travels through user-editable
/// state. An unsaved draft falls back to `document.{ext}`.
pub fn export_filename(doc_no: &str, ext: &str) -> String {
    let mut stem = String::with_capacity(doc_no.len());
    for ch in doc_no.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
        stem.push(if ok { ch } else { '_' });
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        format!("document.{}", ext)
    } else {
        format!("{}.{}", stem, ext)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{totals, Currency, DocType, LineItem};

    fn sample() -> Document {
        let mut doc = Document::draft(DocType::Receipt, Currency::Thb);
        doc.items = vec![
            LineItem::new("Product A", 1.0, "pcs", 100.0),
            LineItem::new("Product B", 2.5, "kg", 250.0),
        ];
        doc.totals = totals::compute(&doc.items, 0.0, 0.0, 7.0);
        doc
    }

    #[test]
    fn test_one_row_per_item() {
        let rows = item_rows(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["Product A", "1", "pcs", "100.00", "100.00"]);
        assert_eq!(rows[1], ["Product B", "2.5", "kg", "250.00", "625.00"]);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("RC-20260823-0001", "csv"), "RC-20260823-0001.csv");
        assert_eq!(export_filename("weird/../name", "pdf"), "weird_.._name.pdf");
        assert_eq!(export_filename("", "html"), "document.html");
    }
}
