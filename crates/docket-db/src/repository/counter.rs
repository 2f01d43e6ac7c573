//! # Counter Repository
//!
//! The stateful half of the document number allocator: one counter row per
//! calendar day, incremented atomically per allocation.
//!
//! ## Why One Statement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RACE-FREE ALLOCATION                                                   │
//! │                                                                         │
//! │  read-then-write (two statements) can hand out duplicates:             │
//! │    Session A: SELECT counter → 3                                       │
//! │    Session B: SELECT counter → 3      ← both saw 3                    │
//! │    Session A: UPDATE counter = 4 → RC-...-0004                        │
//! │    Session B: UPDATE counter = 4 → RC-...-0004  ❌ DUPLICATE          │
//! │                                                                         │
//! │  A single upsert-and-return statement cannot interleave:               │
//! │    INSERT .. ON CONFLICT .. DO UPDATE SET counter = counter + 1        │
//! │    RETURNING counter                                                   │
//! │                                                                         │
//! │  SQLite executes each statement atomically, so counter values for a    │
//! │  day are strictly increasing and never reused.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use docket_core::numbering;

/// Repository for the per-day document number counters.
#[derive(Debug, Clone)]
pub struct CounterRepository {
    pool: SqlitePool,
}

impl CounterRepository {
    /// Creates a new CounterRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CounterRepository { pool }
    }

    /// Allocates the next document number for today's local calendar day.
    ///
    /// ## Arguments
    /// * `prefix` - short document-type code ("RC", "PO", or caller-supplied)
    ///
    /// ## Returns
    /// `{prefix}-{YYYYMMDD}-{NNNN}`, e.g. `RC-20260823-0001`.
    ///
    /// A storage failure propagates as-is; the allocation is not considered
    /// complete and no counter value is consumed on failure paths before the
    /// statement executes.
    pub async fn allocate(&self, prefix: &str) -> DbResult<String> {
        self.allocate_for_day(prefix, Local::now().date_naive()).await
    }

    /// Allocates the next document number for an explicit calendar day.
    ///
    /// The day seam exists so tests (and backfill tooling) can pin the date
    /// key instead of depending on the wall clock.
    pub async fn allocate_for_day(&self, prefix: &str, day: NaiveDate) -> DbResult<String> {
        let date_key = numbering::date_key(day);

        // Single atomic read-increment-write. First allocation of the day
        // inserts counter=1; later ones increment in place.
        let counter: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO doc_counters (date_key, counter)
            VALUES (?1, 1)
            ON CONFLICT (date_key) DO UPDATE SET counter = counter + 1
            RETURNING counter
            "#,
        )
        .bind(&date_key)
        .fetch_one(&self.pool)
        .await?;

        let doc_no = numbering::format_doc_no(prefix, &date_key, counter);
        debug!(doc_no = %doc_no, "Allocated document number");

        Ok(doc_no)
    }

    /// Returns the current counter value for a day, if any allocation
    /// happened on it. Diagnostic helper; allocation never reads this.
    pub async fn current(&self, day: NaiveDate) -> DbResult<Option<i64>> {
        let date_key = numbering::date_key(day);

        let counter: Option<i64> =
            sqlx::query_scalar("SELECT counter FROM doc_counters WHERE date_key = ?1")
                .bind(&date_key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(counter)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_sequential_allocations_increment_by_one() {
        let db = test_db().await;
        let repo = db.counters();
        let d = day(2026, 8, 23);

        let first = repo.allocate_for_day("RC", d).await.unwrap();
        let second = repo.allocate_for_day("RC", d).await.unwrap();
        let third = repo.allocate_for_day("RC", d).await.unwrap();

        assert_eq!(first, "RC-20260823-0001");
        assert_eq!(second, "RC-20260823-0002");
        assert_eq!(third, "RC-20260823-0003");
    }

    #[tokio::test]
    async fn test_concurrent_allocations_are_unique() {
        let db = test_db().await;
        let d = day(2026, 8, 23);

        let mut handles = Vec::new();
        for _ in 0..20 {
            let repo = db.counters();
            handles.push(tokio::spawn(async move {
                repo.allocate_for_day("RC", d).await.unwrap()
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap());
        }

        let mut deduped = numbers.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), numbers.len(), "duplicate doc_no allocated");
        assert_eq!(db.counters().current(d).await.unwrap(), Some(20));
    }

    #[tokio::test]
    async fn test_new_day_resets_counter() {
        let db = test_db().await;
        let repo = db.counters();

        let day_one = day(2026, 8, 23);
        let day_two = day(2026, 8, 24);

        repo.allocate_for_day("RC", day_one).await.unwrap();
        repo.allocate_for_day("RC", day_one).await.unwrap();

        let fresh = repo.allocate_for_day("RC", day_two).await.unwrap();
        assert_eq!(fresh, "RC-20260824-0001");

        // Prior day's counter is untouched
        assert_eq!(repo.current(day_one).await.unwrap(), Some(2));
        assert_eq!(repo.current(day_two).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_prefixes_share_the_day_counter_key() {
        // The counter is keyed by day only; the prefix is formatting.
        let db = test_db().await;
        let repo = db.counters();
        let d = day(2026, 8, 23);

        let rc = repo.allocate_for_day("RC", d).await.unwrap();
        let po = repo.allocate_for_day("PO", d).await.unwrap();

        assert_eq!(rc, "RC-20260823-0001");
        assert_eq!(po, "PO-20260823-0002");
    }
}
