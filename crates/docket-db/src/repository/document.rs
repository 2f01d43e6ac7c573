//! # Document Repository
//!
//! Database operations for documents and their line items.
//!
//! ## Save Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     save(document)                                      │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                     │
//! │    1. INSERT OR REPLACE header + totals row (upsert by doc_no)         │
//! │    2. DELETE all line_items rows for doc_no                            │
//! │    3. INSERT the current item list, position 0..n                      │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Items are replaced wholesale, not diffed: an edit session owns the    │
//! │  full item list, and the transaction guarantees a reader sees either   │
//! │  the old complete set or the new complete set, never a mix.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no delete operation and no single-item update; the engine never
//! removes a persisted document.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use docket_core::{Currency, DocType, Document, DocumentSummary, LineItem, Party, TotalsBreakdown};

// =============================================================================
// Row Types
// =============================================================================

/// Flat header row as stored; folded into `Document` on load.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    doc_no: String,
    created_at: DateTime<Utc>,
    doc_type: DocType,
    seller_name: String,
    seller_address: String,
    seller_tax_id: String,
    buyer_name: String,
    buyer_address: String,
    buyer_tax_id: String,
    payment_method: String,
    note: String,
    currency: Currency,
    subtotal: f64,
    discount: f64,
    shipping: f64,
    vat_rate: f64,
    taxable_base: f64,
    vat_amount: f64,
    total: f64,
}

impl DocumentRow {
    fn into_document(self, items: Vec<LineItem>) -> Document {
        Document {
            doc_no: self.doc_no,
            created_at: self.created_at,
            doc_type: self.doc_type,
            seller: Party {
                name: self.seller_name,
                address: self.seller_address,
                tax_id: self.seller_tax_id,
            },
            buyer: Party {
                name: self.buyer_name,
                address: self.buyer_address,
                tax_id: self.buyer_tax_id,
            },
            payment_method: self.payment_method,
            note: self.note,
            currency: self.currency,
            items,
            totals: TotalsBreakdown {
                subtotal: self.subtotal,
                discount: self.discount,
                shipping: self.shipping,
                vat_rate: self.vat_rate,
                taxable_base: self.taxable_base,
                vat_amount: self.vat_amount,
                total: self.total,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    description: String,
    quantity: f64,
    unit: String,
    unit_price: f64,
    line_total: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    doc_no: String,
    created_at: DateTime<Utc>,
    doc_type: DocType,
    buyer_name: String,
    total: f64,
    currency: Currency,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for document database operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DocumentRepository { pool }
    }

    /// Upserts a document: header + totals by doc_no, items replaced
    /// wholesale. Atomic; a failure leaves the previously saved state
    /// fully intact.
    ///
    /// The document must already carry an allocated number; drafts are a
    /// caller bug, not a storable state.
    pub async fn save(&self, doc: &Document) -> DbResult<()> {
        if doc.doc_no.is_empty() {
            return Err(DbError::MissingDocNo);
        }

        debug!(doc_no = %doc.doc_no, items = doc.items.len(), "Saving document");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO documents (
                doc_no, created_at, doc_type,
                seller_name, seller_address, seller_tax_id,
                buyer_name, buyer_address, buyer_tax_id,
                payment_method, note, currency,
                subtotal, discount, shipping, vat_rate,
                taxable_base, vat_amount, total
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12,
                ?13, ?14, ?15, ?16,
                ?17, ?18, ?19
            )
            "#,
        )
        .bind(&doc.doc_no)
        .bind(doc.created_at)
        .bind(doc.doc_type)
        .bind(&doc.seller.name)
        .bind(&doc.seller.address)
        .bind(&doc.seller.tax_id)
        .bind(&doc.buyer.name)
        .bind(&doc.buyer.address)
        .bind(&doc.buyer.tax_id)
        .bind(&doc.payment_method)
        .bind(&doc.note)
        .bind(doc.currency)
        .bind(doc.totals.subtotal)
        .bind(doc.totals.discount)
        .bind(doc.totals.shipping)
        .bind(doc.totals.vat_rate)
        .bind(doc.totals.taxable_base)
        .bind(doc.totals.vat_amount)
        .bind(doc.totals.total)
        .execute(&mut *tx)
        .await?;

        // Replace-items strategy: clear, then reinsert in order.
        sqlx::query("DELETE FROM line_items WHERE doc_no = ?1")
            .bind(&doc.doc_no)
            .execute(&mut *tx)
            .await?;

        for (position, item) in doc.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO line_items (
                    doc_no, position, description, quantity, unit, unit_price, line_total
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&doc.doc_no)
            .bind(position as i64)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(item.unit_price)
            .bind(item.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Returns the most recent documents as summary projections,
    /// newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<DocumentSummary>> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT doc_no, created_at, doc_type, buyer_name, total, currency
            FROM documents
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DocumentSummary {
                doc_no: row.doc_no,
                created_at: row.created_at,
                doc_type: row.doc_type,
                buyer_name: row.buyer_name,
                total: row.total,
                currency: row.currency,
            })
            .collect())
    }

    /// Loads one full document (header, totals, ordered items).
    ///
    /// Fails with [`DbError::NotFound`] when the doc_no has no row.
    pub async fn load(&self, doc_no: &str) -> DbResult<Document> {
        let header: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT
                doc_no, created_at, doc_type,
                seller_name, seller_address, seller_tax_id,
                buyer_name, buyer_address, buyer_tax_id,
                payment_method, note, currency,
                subtotal, discount, shipping, vat_rate,
                taxable_base, vat_amount, total
            FROM documents
            WHERE doc_no = ?1
            "#,
        )
        .bind(doc_no)
        .fetch_optional(&self.pool)
        .await?;

        let header = header.ok_or_else(|| DbError::not_found("Document", doc_no))?;

        let item_rows: Vec<LineItemRow> = sqlx::query_as(
            r#"
            SELECT description, quantity, unit, unit_price, line_total
            FROM line_items
            WHERE doc_no = ?1
            ORDER BY position
            "#,
        )
        .bind(doc_no)
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(|row| LineItem {
                description: row.description,
                quantity: row.quantity,
                unit: row.unit,
                unit_price: row.unit_price,
                line_total: row.line_total,
            })
            .collect();

        Ok(header.into_document(items))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use docket_core::totals;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_document(doc_no: &str) -> Document {
        let mut doc = Document::draft(DocType::Receipt, Currency::Thb);
        doc.doc_no = doc_no.to_string();
        doc.seller = Party {
            name: "Many Indicator Co.,Ltd.".to_string(),
            address: "Bangkok".to_string(),
            tax_id: "0105534000000".to_string(),
        };
        doc.buyer = Party::named("Customer Name");
        doc.payment_method = "Cash".to_string();
        doc.items = vec![
            LineItem::new("Product A", 1.0, "pcs", 100.0),
            LineItem::new("Product B", 2.0, "pcs", 250.0),
        ];
        doc.totals = totals::compute(&doc.items, 0.0, 0.0, 7.0);
        doc
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let db = test_db().await;
        let repo = db.documents();

        let doc = sample_document("RC-20260823-0001");
        repo.save(&doc).await.unwrap();

        let loaded = repo.load("RC-20260823-0001").await.unwrap();
        assert_eq!(loaded.items.len(), 2);
        assert_eq!(loaded.items, doc.items);
        assert_eq!(loaded.totals, doc.totals);
        assert_eq!(loaded.seller, doc.seller);
        assert_eq!(loaded.buyer, doc.buyer);
        assert_eq!(loaded.currency, Currency::Thb);
    }

    #[tokio::test]
    async fn test_second_save_replaces_items() {
        let db = test_db().await;
        let repo = db.documents();

        let mut doc = sample_document("RC-20260823-0001");
        repo.save(&doc).await.unwrap();

        doc.items = vec![LineItem::new("Replacement", 5.0, "box", 20.0)];
        doc.totals = totals::compute(&doc.items, 0.0, 0.0, 7.0);
        repo.save(&doc).await.unwrap();

        let loaded = repo.load("RC-20260823-0001").await.unwrap();
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].description, "Replacement");
        assert_eq!(loaded.totals.subtotal, 100.0);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let db = test_db().await;

        let err = db.documents().load("RC-19990101-0001").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_draft_is_rejected() {
        let db = test_db().await;
        let doc = Document::draft(DocType::Receipt, Currency::Thb);

        let err = db.documents().save(&doc).await.unwrap_err();
        assert!(matches!(err, DbError::MissingDocNo));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_limited() {
        let db = test_db().await;
        let repo = db.documents();

        for i in 1..=3 {
            let mut doc = sample_document(&format!("RC-20260823-000{}", i));
            // Spread creation times so ordering is deterministic
            doc.created_at = doc.created_at + chrono::Duration::seconds(i);
            repo.save(&doc).await.unwrap();
        }

        let summaries = repo.list(2).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].doc_no, "RC-20260823-0003");
        assert_eq!(summaries[1].doc_no, "RC-20260823-0002");
        assert_eq!(summaries[0].buyer_name, "Customer Name");
        assert_eq!(summaries[0].total, 642.0);
    }

    #[tokio::test]
    async fn test_items_preserve_order() {
        let db = test_db().await;
        let repo = db.documents();

        let mut doc = sample_document("PO-20260823-0001");
        doc.doc_type = DocType::PurchaseOrder;
        doc.items = (0..10)
            .map(|i| LineItem::new(format!("Item {}", i), 1.0, "pcs", i as f64))
            .collect();
        doc.totals = totals::compute(&doc.items, 0.0, 0.0, 7.0);
        repo.save(&doc).await.unwrap();

        let loaded = repo.load("PO-20260823-0001").await.unwrap();
        let names: Vec<&str> = loaded.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names[0], "Item 0");
        assert_eq!(names[9], "Item 9");
        assert_eq!(loaded.doc_type, DocType::PurchaseOrder);
    }
}
