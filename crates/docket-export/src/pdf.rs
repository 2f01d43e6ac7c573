//! # PDF Exporter
//!
//! Direct A4 page drawing with printpdf.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [logo]                        RECEIPT        │  header block
//! │                               RC-20260823-01 │
//! │                               2026-08-23     │
//! │ ──────────────────────────────────────────── │
//! │ From:                  To:                   │  address blocks
//! │ seller name            buyer name            │
//! │ address / tax id       address / tax id      │
//! │                                              │
//! │ Description   Qty  Unit   Price      Total   │  item table
//! │ ──────────────────────────────────────────── │  (paginated; header
//! │ ...rows...                                   │   re-drawn per page)
//! │ ──────────────────────────────────────────── │
//! │                        Subtotal      600.00  │  totals box
//! │                        VAT (7%)       42.00  │
//! │                        TOTAL     642.00 THB  │
//! │ Payment: Cash                                │
//! │ Note: ...                                    │
//! │              Generated by Docket · Page 1    │  footer
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Capabilities
//! The renderer is behind the [`PdfRenderer`] trait so environments without
//! a PDF engine simply don't wire one in (CSV and HTML remain available).
//! Within the renderer, the logo and the embedded font are optional assets:
//! a missing or unloadable file downgrades silently, never fails the export.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::debug;

use docket_core::money::format_amount;
use docket_core::Document;

use crate::assets::ExportAssets;
use crate::error::{ExportError, ExportResult};
use crate::table;

// =============================================================================
// Renderer Trait (injected capability)
// =============================================================================

/// A PDF rendering capability.
///
/// Injected where needed; when no implementation is available in the running
/// environment, PDF export is disabled rather than crashing, and the other
/// export formats stay usable.
pub trait PdfRenderer: Send + Sync {
    /// Renders the document to PDF bytes.
    fn render(&self, doc: &Document) -> ExportResult<Vec<u8>>;
}

// =============================================================================
// Layout Constants
// =============================================================================

const PAGE_WIDTH_MM: f32 = 210.0; // A4
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

/// Item rows drawn per page before a page break re-draws the column header.
const MAX_ROWS_PER_PAGE: usize = 28;

/// Descriptions longer than this are cut with an ellipsis marker.
const DESC_MAX_CHARS: usize = 44;

const ROW_STEP_MM: f32 = 6.0;
const TABLE_TOP_FIRST_PAGE_MM: f32 = 222.0;
const TABLE_TOP_CONT_PAGE_MM: f32 = 277.0;
const TOTALS_MIN_Y_MM: f32 = 70.0;

// Table column x positions
const X_DESC: f32 = MARGIN_MM;
const X_QTY: f32 = 112.0;
const X_UNIT: f32 = 130.0;
const X_PRICE: f32 = 150.0;
const X_TOTAL: f32 = 176.0;

// =============================================================================
// printpdf Renderer
// =============================================================================

/// The default [`PdfRenderer`] built on printpdf.
#[derive(Debug, Clone, Default)]
pub struct PrintPdfRenderer {
    assets: ExportAssets,
}

impl PrintPdfRenderer {
    /// Creates a renderer with explicit asset locations.
    pub fn new(assets: ExportAssets) -> Self {
        PrintPdfRenderer { assets }
    }
}

impl PdfRenderer for PrintPdfRenderer {
    fn render(&self, doc: &Document) -> ExportResult<Vec<u8>> {
        let title = doc.doc_type.title();
        let (pdf, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let mut layer = pdf.get_page(page1).get_layer(layer1);

        let bold = pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let regular = self.body_font(&pdf)?;

        let mut page_no = 1;

        // ---- Header block -------------------------------------------------
        self.draw_logo(&layer);

        let doc_no_display = if doc.is_draft() { "(draft)" } else { &doc.doc_no };
        text(&layer, &bold, title, 20.0, 125.0, 280.0);
        text(&layer, &bold, doc_no_display, 12.0, 125.0, 272.0);
        text(
            &layer,
            &regular,
            &format!("Date: {}", doc.created_at.format("%Y-%m-%d")),
            10.0,
            125.0,
            266.0,
        );

        rule(&layer, 260.0);

        // ---- Address blocks ----------------------------------------------
        let left = MARGIN_MM;
        let right = 112.0;
        text(&layer, &bold, "From:", 11.0, left, 252.0);
        text(&layer, &bold, "To:", 11.0, right, 252.0);

        draw_party_block(&layer, &regular, &doc.seller.name, &doc.seller.address, &doc.seller.tax_id, left);
        draw_party_block(&layer, &regular, &doc.buyer.name, &doc.buyer.address, &doc.buyer.tax_id, right);

        // ---- Item table ---------------------------------------------------
        let mut y = TABLE_TOP_FIRST_PAGE_MM;
        y = draw_table_header(&layer, &bold, y);

        let mut rows_on_page = 0usize;
        for row in table::item_rows(doc) {
            if rows_on_page == MAX_ROWS_PER_PAGE {
                draw_footer(&layer, &regular, page_no);
                let (page, new_layer) =
                    pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = pdf.get_page(page).get_layer(new_layer);
                page_no += 1;
                rows_on_page = 0;
                y = draw_table_header(&layer, &bold, TABLE_TOP_CONT_PAGE_MM);
            }

            let description = truncate_description(&row[0], DESC_MAX_CHARS);
            text(&layer, &regular, &description, 10.0, X_DESC, y);
            text(&layer, &regular, &row[1], 10.0, X_QTY, y);
            text(&layer, &regular, &row[2], 10.0, X_UNIT, y);
            text(&layer, &regular, &row[3], 10.0, X_PRICE, y);
            text(&layer, &regular, &row[4], 10.0, X_TOTAL, y);

            y -= ROW_STEP_MM;
            rows_on_page += 1;
        }

        y -= 2.0;
        rule(&layer, y);
        y -= 8.0;

        // ---- Totals box ---------------------------------------------------
        if y < TOTALS_MIN_Y_MM {
            draw_footer(&layer, &regular, page_no);
            let (page, new_layer) = pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = pdf.get_page(page).get_layer(new_layer);
            page_no += 1;
            y = TABLE_TOP_CONT_PAGE_MM;
        }

        let currency = doc.currency.code();
        let totals = &doc.totals;
        let label_x = 120.0;
        let value_x = 165.0;

        text(&layer, &regular, "Subtotal:", 11.0, label_x, y);
        text(&layer, &regular, &format_amount(totals.subtotal), 11.0, value_x, y);
        y -= ROW_STEP_MM;
        text(&layer, &regular, "Discount:", 11.0, label_x, y);
        text(&layer, &regular, &format!("-{}", format_amount(totals.discount)), 11.0, value_x, y);
        y -= ROW_STEP_MM;
        text(&layer, &regular, "Shipping:", 11.0, label_x, y);
        text(&layer, &regular, &format_amount(totals.shipping), 11.0, value_x, y);
        y -= ROW_STEP_MM;
        text(
            &layer,
            &regular,
            &format!("VAT ({}%):", table::format_quantity(totals.vat_rate)),
            11.0,
            label_x,
            y,
        );
        text(&layer, &regular, &format_amount(totals.vat_amount), 11.0, value_x, y);
        y -= 7.5;
        text(&layer, &bold, "TOTAL:", 13.0, label_x, y);
        text(
            &layer,
            &bold,
            &format!("{} {}", format_amount(totals.total), currency),
            13.0,
            value_x - 10.0,
            y,
        );

        // ---- Payment and note --------------------------------------------
        y -= 12.0;
        if !doc.payment_method.is_empty() {
            text(&layer, &regular, &format!("Payment: {}", doc.payment_method), 10.0, MARGIN_MM, y);
            y -= ROW_STEP_MM;
        }
        if !doc.note.is_empty() {
            text(&layer, &bold, "Note:", 10.0, MARGIN_MM, y);
            y -= 5.0;
            for line in doc.note.lines() {
                if y < 20.0 {
                    break;
                }
                text(&layer, &regular, line, 9.0, MARGIN_MM, y);
                y -= 5.0;
            }
        }

        draw_footer(&layer, &regular, page_no);

        // ---- Serialize ----------------------------------------------------
        let mut writer = BufWriter::new(Vec::<u8>::new());
        pdf.save(&mut writer)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

impl PrintPdfRenderer {
    /// Body font: the optional external TTF when it registers, the built-in
    /// Helvetica otherwise. Never a fatal error, only a silent downgrade.
    fn body_font(&self, pdf: &PdfDocumentReference) -> ExportResult<IndirectFontRef> {
        if let Some(mut reader) = self.assets.font_reader() {
            match pdf.add_external_font(&mut reader) {
                Ok(font) => return Ok(font),
                Err(err) => {
                    debug!(%err, "External font failed to register, using built-in font");
                }
            }
        }
        pdf.add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }

    /// Draws the optional logo in the header. Missing or undecodable files
    /// leave the header logo-less.
    fn draw_logo(&self, layer: &PdfLayerReference) {
        let Some(mut reader) = self.assets.logo_reader() else {
            return;
        };

        let decoder = match printpdf::image_crate::codecs::png::PngDecoder::new(&mut reader) {
            Ok(decoder) => decoder,
            Err(err) => {
                debug!(%err, "Logo is not a decodable PNG, skipping");
                return;
            }
        };
        let image = match Image::try_from(decoder) {
            Ok(image) => image,
            Err(err) => {
                debug!(%err, "Logo could not be embedded, skipping");
                return;
            }
        };

        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(266.0)),
                ..ImageTransform::default()
            },
        );
    }
}

// =============================================================================
// Drawing Helpers
// =============================================================================

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, s: &str, size: f32, x: f32, y: f32) {
    layer.use_text(s, size, Mm(x), Mm(y), font);
}

/// Full-width horizontal rule at the given height.
fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_MM), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Name / address / tax-id lines for one party, capped to the block height.
fn draw_party_block(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    name: &str,
    address: &str,
    tax_id: &str,
    x: f32,
) {
    let mut y = 246.0;
    text(layer, font, name, 10.0, x, y);
    y -= 5.0;
    for line in address.lines().take(2) {
        text(layer, font, line, 9.0, x, y);
        y -= 5.0;
    }
    if !tax_id.is_empty() {
        text(layer, font, &format!("Tax ID: {}", tax_id), 9.0, x, y);
    }
}

/// Column titles and the underline; returns the y of the first row.
fn draw_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) -> f32 {
    text(layer, bold, table::ITEM_COLUMNS[0], 10.0, X_DESC, y);
    text(layer, bold, table::ITEM_COLUMNS[1], 10.0, X_QTY, y);
    text(layer, bold, table::ITEM_COLUMNS[2], 10.0, X_UNIT, y);
    text(layer, bold, table::ITEM_COLUMNS[3], 10.0, X_PRICE, y);
    text(layer, bold, table::ITEM_COLUMNS[4], 10.0, X_TOTAL, y);
    rule(layer, y - 2.0);
    y - 8.0
}

fn draw_footer(layer: &PdfLayerReference, font: &IndirectFontRef, page_no: usize) {
    text(
        layer,
        font,
        &format!("Generated by Docket - Page {}", page_no),
        8.0,
        MARGIN_MM,
        10.0,
    );
}

/// Cuts an over-long description at a character boundary with an ellipsis
/// marker. The limit is in characters, not bytes, so multi-byte text is safe.
fn truncate_description(description: &str, max_chars: usize) -> String {
    if description.chars().count() <= max_chars {
        return description.to_string();
    }
    let cut: String = description.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

// =============================================================================
// Unit Tests
// =============================================================================
