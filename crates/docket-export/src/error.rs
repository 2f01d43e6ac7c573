//! # Export Error Types
//!
//! One taxonomy for all three exporters. Optional-asset problems (missing
//! logo, unloadable font) are deliberately NOT here: those are silent
//! fallbacks, never errors.

use thiserror::Error;

/// Export operation errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV generation failed: {0}")]
    Csv(#[from] ::csv::Error),

    /// The in-memory CSV buffer could not be recovered from the writer.
    #[error("CSV buffer error: {0}")]
    CsvBuffer(String),

    /// PDF drawing or serialization failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// No PDF rendering capability is wired into this environment.
    ///
    /// The other export formats remain usable; callers disable the PDF
    /// option rather than treating this as a crash.
    #[error("PDF export is not available")]
    PdfUnavailable,

    /// Underlying I/O failure while assembling a payload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
