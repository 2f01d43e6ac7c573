//! # Service Error Type
//!
//! Unified error type for the document workflow surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Docket                                 │
//! │                                                                         │
//! │  Caller (UI / CLI)           Service Layer                              │
//! │  ─────────────────           ─────────────                              │
//! │                                                                         │
//! │  service.save(&mut doc)                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Method                                                  │  │
//! │  │  Result<T, ServiceError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ──── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          ▼            │  │
//! │  │  Export Error? ───── ExportError::Pdf("...") ── ServiceError ──►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The caller shows `message` and leaves the in-memory document           │
//! │  untouched — a failed save never corrupts what the user typed.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! The error serializes as a machine-readable `code` plus a human-readable
//! `message`, so non-Rust frontends can branch on the code. Raw driver
//! messages and traces are logged here, never shipped to the caller.

use serde::Serialize;

use docket_db::DbError;
use docket_export::ExportError;

/// Error returned from service operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Document not found: RC-20260823-0099"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Document not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// An exporter failed to produce output
    ExportFailed,

    /// PDF requested but no renderer is wired in
    PdfUnavailable,

    /// Internal error
    Internal,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to service errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            DbError::MissingDocNo => {
                // The service allocates before persisting, so this is a bug
                // in the caller, not user input.
                tracing::error!("Draft reached the store without a document number");
                ServiceError::internal("Document was not numbered before saving")
            }
            DbError::ConnectionFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ServiceError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts exporter errors to service errors.
impl From<ExportError> for ServiceError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::PdfUnavailable => ServiceError::new(
                ErrorCode::PdfUnavailable,
                "PDF export is not available in this environment",
            ),
            ExportError::Csv(e) => {
                tracing::error!("CSV export failed: {}", e);
                ServiceError::new(ErrorCode::ExportFailed, "CSV export failed")
            }
            ExportError::CsvBuffer(e) => {
                tracing::error!("CSV buffer error: {}", e);
                ServiceError::new(ErrorCode::ExportFailed, "CSV export failed")
            }
            ExportError::Pdf(e) => {
                tracing::error!("PDF rendering failed: {}", e);
                ServiceError::new(ErrorCode::ExportFailed, "PDF rendering failed")
            }
            ExportError::Io(e) => {
                tracing::error!("Export I/O failed: {}", e);
                ServiceError::new(ErrorCode::ExportFailed, "Export failed")
            }
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_through() {
        let err: ServiceError = DbError::not_found("Document", "RC-20260823-0099").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("RC-20260823-0099"));
    }

    #[test]
    fn test_query_failure_message_is_generic() {
        // Driver details stay in the logs
        let err: ServiceError = DbError::QueryFailed("near \"SELEC\": syntax error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_pdf_unavailable_has_distinct_code() {
        let err: ServiceError = ExportError::PdfUnavailable.into();
        assert_eq!(err.code, ErrorCode::PdfUnavailable);
    }

    #[test]
    fn test_serializes_as_code_and_message() {
        let err = ServiceError::not_found("Document", "X");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Document not found: X");
    }
}
