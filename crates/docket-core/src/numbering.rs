//! # Document Numbering
//!
//! The pure half of the document number allocator: date keys and number
//! formatting. The stateful counter (atomic read-increment-write against
//! the database) lives in `docket-db`; this module guarantees that both
//! sides agree on the format.
//!
//! ## Format
//! `{PREFIX}-{YYYYMMDD}-{NNNN}` — e.g. `RC-20260823-0001`
//!
//! - PREFIX: short document-type code ("RC", "PO", or caller-supplied)
//! - YYYYMMDD: local calendar day the number was allocated on
//! - NNNN: per-day counter, zero-padded to 4 digits (grows past 4 digits
//!   rather than wrapping if a day somehow exceeds 9999 documents)

use chrono::NaiveDate;

/// Width the per-day counter is zero-padded to.
pub const COUNTER_PAD: usize = 4;

/// Formats a calendar day as the counter key, `YYYYMMDD`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use docket_core::numbering::date_key;
///
/// let day = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
/// assert_eq!(date_key(day), "20260823");
/// ```
pub fn date_key(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}

/// Formats a full document number from its three parts.
///
/// ## Example
/// ```rust
/// use docket_core::numbering::format_doc_no;
///
/// assert_eq!(format_doc_no("RC", "20260823", 1), "RC-20260823-0001");
/// assert_eq!(format_doc_no("PO", "20260823", 12345), "PO-20260823-12345");
/// ```
pub fn format_doc_no(prefix: &str, date_key: &str, counter: i64) -> String {
    format!("{}-{}-{:0width$}", prefix, date_key, counter, width = COUNTER_PAD)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_zero_pads_month_and_day() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(date_key(day), "20260105");
    }

    #[test]
    fn test_format_pads_counter() {
        assert_eq!(format_doc_no("RC", "20260823", 1), "RC-20260823-0001");
        assert_eq!(format_doc_no("RC", "20260823", 999), "RC-20260823-0999");
    }

    #[test]
    fn test_format_does_not_truncate_large_counters() {
        assert_eq!(format_doc_no("PO", "20260823", 10001), "PO-20260823-10001");
    }
}
