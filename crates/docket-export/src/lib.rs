//! # Docket Export
//!
//! Document exporters: CSV, self-contained HTML, and PDF.
//!
//! ## Architecture
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                   docket-export                    │
//! │                                                    │
//! │            ┌──────────┐                            │
//! │            │  table   │  shared item-table view    │
//! │            └────┬─────┘                            │
//! │        ┌────────┼────────────┐                     │
//! │   ┌────┴───┐ ┌──┴───┐ ┌──────┴──────┐              │
//! │   │  csv   │ │ html │ │     pdf     │              │
//! │   └────────┘ └──────┘ └──────┬──────┘              │
//! │                       ┌──────┴──────┐              │
//! │                       │   assets    │ logo + font  │
//! │                       └─────────────┘              │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! CSV and HTML are pure functions over a [`Document`]. PDF rendering sits
//! behind the [`PdfRenderer`] trait so callers can run without a PDF engine
//! and still offer the other two formats.
//!
//! [`Document`]: docket_core::Document

pub mod assets;
pub mod csv;
pub mod error;
pub mod html;
pub mod pdf;
pub mod table;

pub use assets::ExportAssets;
pub use csv::export_csv;
pub use error::{ExportError, ExportResult};
pub use html::export_html;
pub use pdf::{PdfRenderer, PrintPdfRenderer};
