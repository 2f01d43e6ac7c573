//! # docket-core: Pure Business Logic for Docket
//!
//! This crate is the heart of the Docket document engine. It contains the
//! totals arithmetic, the document-number format, and the domain types, all
//! as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Docket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  docket-service (facade)                        │   │
//! │  │   new_document ── save ── load ── list ── export                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ docket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ numbering  │  │   │
//! │  │   │ Document  │  │ coercion  │  │ compute() │  │ date_key   │  │   │
//! │  │   │ LineItem  │  │ rounding  │  │           │  │ format     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │            ┌───────────────────┴──────────────────┐                     │
//! │            ▼                                      ▼                     │
//! │  ┌──────────────────┐                 ┌─────────────────────┐          │
//! │  │    docket-db     │                 │    docket-export    │          │
//! │  │ SQLite documents │                 │   CSV / HTML / PDF  │          │
//! │  │ + daily counters │                 │                     │          │
//! │  └──────────────────┘                 └─────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Derived values stay derived**: line totals and the totals breakdown
//!    are always recomputed from current inputs, never stored as
//!    independently mutated fields.
//! 2. **Leniency in one place**: the form contract zeroes bad numeric input
//!    instead of rejecting it; that rule lives only in
//!    [`money::coerce_non_negative`].
//! 3. **No I/O**: database and file access are forbidden here.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod money;
pub mod numbering;
pub mod totals;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use types::{Currency, DocType, Document, DocumentSummary, LineItem, Party, TotalsBreakdown};
