//! # HTML Exporter
//!
//! Renders a self-contained printable page: header fields, the item table,
//! and the totals block, with all styling embedded so the single file opens
//! and prints from any browser. This is the deliberate low-dependency
//! fallback when the PDF engine is unavailable — open, Print, Save as PDF.

use docket_core::money::format_amount;
use docket_core::Document;

use crate::error::ExportResult;
use crate::table;

/// Exports the document as a self-contained UTF-8 HTML page.
///
/// Pure: no shared state, no side effects. Infallible in practice; the
/// `Result` keeps the three exporter signatures uniform.
pub fn export_html(doc: &Document) -> ExportResult<Vec<u8>> {
    let currency = doc.currency.code();
    let mut rows_html = String::new();
    for row in table::item_rows(doc) {
        rows_html.push_str("      <tr>");
        for (idx, cell) in row.iter().enumerate() {
            // Numeric columns align right; description/unit stay left.
            let class = if idx == 0 || idx == 2 { "" } else { " class=\"num\"" };
            rows_html.push_str(&format!("<td{}>{}</td>", class, escape(cell)));
        }
        rows_html.push_str("</tr>\n");
    }

    let header_cells: String = table::ITEM_COLUMNS
        .iter()
        .map(|name| format!("<th>{}</th>", name))
        .collect();

    let totals = &doc.totals;
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} {doc_no}</title>
<style>
  body {{ font-family: Arial, sans-serif; margin: 2em; color: #222; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ border: 1px solid #333; padding: 8px; }}
  th {{ background: #eee; text-align: left; }}
  td.num {{ text-align: right; }}
  .parties {{ display: flex; gap: 4em; margin: 1em 0; }}
  .totals {{ margin-top: 1em; width: 40%; margin-left: auto; }}
  .totals td {{ border: none; padding: 4px 8px; }}
  .totals tr.grand td {{ border-top: 2px solid #333; font-weight: bold; }}
  .note {{ margin-top: 1.5em; font-size: 0.9em; }}
</style>
</head>
<body>
<h2>{title}</h2>
<p><b>Doc No:</b> {doc_no}<br>
   <b>Date:</b> {date}<br>
   <b>Payment:</b> {payment}</p>
<div class="parties">
  <div><b>Seller</b><br>{seller_name}<br>{seller_address}<br>Tax ID: {seller_tax_id}</div>
  <div><b>Buyer</b><br>{buyer_name}<br>{buyer_address}<br>Tax ID: {buyer_tax_id}</div>
</div>
<table>
  <thead><tr>{header_cells}</tr></thead>
  <tbody>
{rows}  </tbody>
</table>
<table class="totals">
  <tr><td>Subtotal</td><td class="num">{subtotal} {currency}</td></tr>
  <tr><td>Discount</td><td class="num">-{discount} {currency}</td></tr>
  <tr><td>Shipping</td><td class="num">{shipping} {currency}</td></tr>
  <tr><td>VAT ({vat_rate}%)</td><td class="num">{vat_amount} {currency}</td></tr>
  <tr class="grand"><td>Total</td><td class="num">{total} {currency}</td></tr>
</table>
<p class="note">{note}</p>
</body>
</html>
"#,
        title = doc.doc_type.title(),
        doc_no = escape(&doc.doc_no),
        date = doc.created_at.format("%Y-%m-%d"),
        payment = escape(&doc.payment_method),
        seller_name = escape(&doc.seller.name),
        seller_address = escape(&doc.seller.address),
        seller_tax_id = escape(&doc.seller.tax_id),
        buyer_name = escape(&doc.buyer.name),
        buyer_address = escape(&doc.buyer.address),
        buyer_tax_id = escape(&doc.buyer.tax_id),
        header_cells = header_cells,
        rows = rows_html,
        subtotal = format_amount(totals.subtotal),
        discount = format_amount(totals.discount),
        shipping = format_amount(totals.shipping),
        vat_rate = table::format_quantity(totals.vat_rate),
        vat_amount = format_amount(totals.vat_amount),
        total = format_amount(totals.total),
        currency = currency,
        note = escape(&doc.note),
    );

    Ok(html.into_bytes())
}

/// Minimal HTML entity escaping for text nodes and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{totals, Currency, DocType, LineItem, Party};

    fn sample() -> Document {
        let mut doc = Document::draft(DocType::Receipt, Currency::Thb);
        doc.doc_no = "RC-20260823-0001".to_string();
        doc.seller = Party::named("Many Indicator Co.,Ltd.");
        doc.buyer = Party::named("Customer <script>");
        doc.items = vec![
            LineItem::new("Product A", 1.0, "pcs", 100.0),
            LineItem::new("Product B", 2.0, "pcs", 250.0),
        ];
        doc.totals = totals::compute(&doc.items, 0.0, 0.0, 7.0);
        doc
    }

    fn render(doc: &Document) -> String {
        String::from_utf8(export_html(doc).unwrap()).unwrap()
    }

    #[test]
    fn test_contains_header_and_totals() {
        let html = render(&sample());
        assert!(html.contains("RECEIPT"));
        assert!(html.contains("RC-20260823-0001"));
        assert!(html.contains("600.00 THB"));
        assert!(html.contains("42.00 THB"));
        assert!(html.contains("642.00 THB"));
    }

    #[test]
    fn test_one_table_row_per_item() {
        let html = render(&sample());
        // Item rows carry the 6-space body indent; totals rows do not.
        assert_eq!(html.matches("      <tr><td>").count(), 2);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render(&sample());
        assert!(html.contains("Customer &lt;script&gt;"));
        assert!(!html.contains("Customer <script>"));
    }

    #[test]
    fn test_self_contained_no_external_references() {
        let html = render(&sample());
        assert!(!html.contains("href="));
        assert!(!html.contains("src="));
        assert!(html.contains("<style>"));
    }
}
