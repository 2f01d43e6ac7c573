//! # Docket Service
//!
//! The orchestration layer tying the pure core, the SQLite store, and the
//! exporters into one frontend-facing surface.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      docket-service                         │
//! │                                                             │
//! │   ┌──────────────────┐          ┌──────────────────┐        │
//! │   │ DocumentService  │─────────►│   ServiceError   │        │
//! │   │ (workflow)       │          │ (code + message) │        │
//! │   └────────┬─────────┘          └──────────────────┘        │
//! │            │                                                │
//! └────────────┼────────────────────────────────────────────────┘
//!              │
//!    ┌─────────┼──────────────┬─────────────────┐
//!    ▼         ▼              ▼                 ▼
//! docket-core  docket-db      docket-export   (optional)
//! totals,      counters,      csv, html       PdfRenderer
//! numbering    documents
//! ```
//!
//! Callers hold a [`DocumentService`] and never touch repositories or
//! exporters directly; every failure surfaces as a [`ServiceError`] with a
//! stable code and a display-safe message.

pub mod error;
pub mod service;
pub mod telemetry;

pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use service::{DocumentService, ExportFile, ExportFormat};

// Re-export the building blocks embedders need to construct a service.
pub use docket_core::{Currency, DocType, Document, LineItem, Party};
pub use docket_db::{Database, DbConfig};
pub use docket_export::{ExportAssets, PrintPdfRenderer};
