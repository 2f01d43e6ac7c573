//! # Repository Module
//!
//! Database repository implementations for Docket.
//!
//! ## Available Repositories
//!
//! - [`document::DocumentRepository`] - Document upsert / list / load
//! - [`counter::CounterRepository`] - Atomic daily document numbering

pub mod counter;
pub mod document;
