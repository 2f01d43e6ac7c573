//! # Document Service
//!
//! Orchestrates the document lifecycle: draft → recalculate → number →
//! persist → export.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  service.save(&mut doc)                                                 │
//! │                                                                         │
//! │  1. recalculate totals from current items + charges                     │
//! │  2. draft?  ──yes──► counters().allocate("RC")  →  doc.doc_no assigned  │
//! │        │no                                         (exactly once; a     │
//! │        ▼                                            re-save keeps it)   │
//! │  3. documents().save(&doc)   (header + items, atomically)               │
//! │                                                                         │
//! │  Failure at any step leaves the in-memory document untouched except     │
//! │  that a number allocated in step 2 stays assigned — the day counter     │
//! │  never rolls back, so numbers are never reused.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use docket_core::{Currency, DocType, Document, DocumentSummary};
use docket_db::Database;
use docket_export::error::ExportError;
use docket_export::table;
use docket_export::{export_csv, export_html, PdfRenderer};

use crate::error::ServiceResult;

// =============================================================================
// Export Formats
// =============================================================================

/// Available export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Html,
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type for download responses.
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A produced export: bytes plus download metadata.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Download filename, `{docNo}.{ext}` (or `document.{ext}` for drafts).
    pub filename: String,
    /// MIME type matching the format.
    pub mime: &'static str,
    /// The rendered payload.
    pub bytes: Vec<u8>,
}

// =============================================================================
// Service
// =============================================================================

/// The document workflow service.
///
/// Owns the database handle and the optional PDF capability; everything a
/// frontend needs goes through here.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./docket.db")).await?;
/// let service = DocumentService::new(db).with_pdf_renderer(PrintPdfRenderer::default());
///
/// let mut doc = service.new_document(DocType::Receipt, Currency::Thb);
/// doc.items.push(LineItem::new("Widget", 2.0, "pcs", 300.0));
/// let doc_no = service.save(&mut doc).await?;
/// let file = service.export(&doc, ExportFormat::Pdf)?;
/// ```
pub struct DocumentService {
    db: Database,
    pdf: Option<Box<dyn PdfRenderer>>,
}

impl DocumentService {
    /// Creates a service without PDF capability (CSV and HTML only).
    pub fn new(db: Database) -> Self {
        DocumentService { db, pdf: None }
    }

    /// Wires in a PDF renderer, enabling the third export format.
    pub fn with_pdf_renderer(mut self, renderer: impl PdfRenderer + 'static) -> Self {
        self.pdf = Some(Box::new(renderer));
        self
    }

    /// Direct access to the database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Starts a new draft document. Pure; nothing is persisted and no
    /// number is consumed until the first [`save`](Self::save).
    pub fn new_document(&self, doc_type: DocType, currency: Currency) -> Document {
        Document::draft(doc_type, currency)
    }

    /// Recalculates, numbers (first save only), and persists the document.
    ///
    /// Returns the document number. A draft gets one allocated here; a
    /// previously saved document keeps its number and is overwritten in
    /// place, so repeated saves of the same form update one record.
    pub async fn save(&self, doc: &mut Document) -> ServiceResult<String> {
        let (discount, shipping, vat_rate) =
            (doc.totals.discount, doc.totals.shipping, doc.totals.vat_rate);
        doc.recalculate(discount, shipping, vat_rate);

        if doc.is_draft() {
            doc.doc_no = self.db.counters().allocate(doc.doc_type.prefix()).await?;
            debug!(doc_no = %doc.doc_no, "Numbered draft document");
        }

        self.db.documents().save(doc).await?;

        info!(
            doc_no = %doc.doc_no,
            items = doc.items.len(),
            total = doc.totals.total,
            "Document saved"
        );
        Ok(doc.doc_no.clone())
    }

    /// Loads a document with its items and stored totals.
    pub async fn load(&self, doc_no: &str) -> ServiceResult<Document> {
        Ok(self.db.documents().load(doc_no).await?)
    }

    /// Lists saved documents, newest first.
    pub async fn list(&self, limit: u32) -> ServiceResult<Vec<DocumentSummary>> {
        Ok(self.db.documents().list(limit).await?)
    }

    /// The formats this service instance can actually produce.
    ///
    /// PDF appears only when a renderer was wired in; frontends use this to
    /// hide the option instead of offering a button that errors.
    pub fn available_formats(&self) -> Vec<ExportFormat> {
        let mut formats = vec![ExportFormat::Csv, ExportFormat::Html];
        if self.pdf.is_some() {
            formats.push(ExportFormat::Pdf);
        }
        formats
    }

    /// Exports the document in the requested format.
    ///
    /// Pure with respect to storage: exports whatever state the given
    /// document holds, saved or not.
    pub fn export(&self, doc: &Document, format: ExportFormat) -> ServiceResult<ExportFile> {
        let bytes = match format {
            ExportFormat::Csv => export_csv(doc)?,
            ExportFormat::Html => export_html(doc)?,
            ExportFormat::Pdf => match &self.pdf {
                Some(renderer) => renderer.render(doc)?,
                None => return Err(ExportError::PdfUnavailable.into()),
            },
        };

        debug!(doc_no = %doc.doc_no, format = ?format, size = bytes.len(), "Export produced");

        Ok(ExportFile {
            filename: table::export_filename(&doc.doc_no, format.extension()),
            mime: format.mime(),
            bytes,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
