//! # docket-db: Database Layer for Docket
//!
//! SQLite persistence for documents and the daily numbering counter,
//! using sqlx for async operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (document, counter)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docket_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/docket.db")).await?;
//!
//! let doc_no = db.counters().allocate("RC").await?;
//! db.documents().save(&document).await?;
//! let recent = db.documents().list(20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::counter::CounterRepository;
pub use repository::document::DocumentRepository;
