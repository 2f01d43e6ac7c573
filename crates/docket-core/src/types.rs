//! # Domain Types
//!
//! Core domain types for Docket documents.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Document     │   │    LineItem     │   │ TotalsBreakdown │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  doc_no         │   │  description    │   │  subtotal       │       │
//! │  │  doc_type       │   │  quantity       │   │  discount       │       │
//! │  │  seller/buyer   │   │  unit_price     │   │  vat_amount     │       │
//! │  │  items, totals  │   │  line_total (*) │   │  total (*)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  (*) derived fields — always recomputed, never entered directly        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived-Value Invariants
//! - `LineItem::line_total == round2(quantity × unit_price)` after every
//!   [`LineItem::recompute_total`] / [`Document::recalculate`].
//! - `TotalsBreakdown` is produced only by [`crate::totals::compute`]; no
//!   field of it is independently mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{coerce_non_negative, round2};

// =============================================================================
// Document Type
// =============================================================================

/// The kind of business document being produced.
///
/// The kind drives the document-number prefix and the printed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// A receipt for a completed sale.
    Receipt,
    /// A purchase order sent to a supplier.
    PurchaseOrder,
}

impl DocType {
    /// Document-number prefix for this kind (`RC-...` / `PO-...`).
    pub const fn prefix(&self) -> &'static str {
        match self {
            DocType::Receipt => "RC",
            DocType::PurchaseOrder => "PO",
        }
    }

    /// Printed title used in the HTML page and the PDF header block.
    pub const fn title(&self) -> &'static str {
        match self {
            DocType::Receipt => "RECEIPT",
            DocType::PurchaseOrder => "PURCHASE ORDER",
        }
    }
}

impl Default for DocType {
    fn default() -> Self {
        DocType::Receipt
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Supported document currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Thai Baht.
    Thb,
    /// US Dollar.
    Usd,
}

impl Currency {
    /// ISO 4217 code, as rendered next to amounts.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Thb => "THB",
            Currency::Usd => "USD",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Thb
    }
}

// =============================================================================
// Party
// =============================================================================

/// One side of the document: the seller or the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Company or person name.
    pub name: String,
    /// Postal address, free text (may span lines).
    pub address: String,
    /// Tax identifier (VAT ID / PIB / TIN), free text.
    pub tax_id: String,
}

impl Party {
    /// Convenience constructor for a name-only party.
    pub fn named(name: impl Into<String>) -> Self {
        Party {
            name: name.into(),
            ..Party::default()
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the item table.
///
/// `line_total` is a derived field: it is never trusted as entered input and
/// is recomputed from quantity × unit price before any calculation, save,
/// or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// What was sold or ordered.
    pub description: String,
    /// Non-negative, possibly fractional quantity.
    pub quantity: f64,
    /// Short unit label ("pcs", "kg", "hr").
    pub unit: String,
    /// Non-negative price per unit.
    pub unit_price: f64,
    /// Derived: `round2(quantity × unit_price)`.
    pub line_total: f64,
}

impl LineItem {
    /// Creates a line item with its total already derived.
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        let mut item = LineItem {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            line_total: 0.0,
        };
        item.recompute_total();
        item
    }

    /// Re-derives `line_total`, coercing quantity and price first.
    ///
    /// Coercion writes back: a NaN or negative quantity becomes 0 on the
    /// item itself, so persisted rows never carry invalid numbers.
    pub fn recompute_total(&mut self) {
        self.quantity = coerce_non_negative(self.quantity);
        self.unit_price = coerce_non_negative(self.unit_price);
        self.line_total = round2(self.quantity * self.unit_price);
    }
}

// =============================================================================
// Totals Breakdown
// =============================================================================

/// The computed money summary of a document.
///
/// Produced exclusively by [`crate::totals::compute`]. `taxable_base`,
/// `vat_amount` and `total` are derived; `discount`, `shipping` and
/// `vat_rate` echo the (clamped) inputs they were computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    /// Sum of all derived line totals.
    pub subtotal: f64,
    /// Clamped discount input (≥ 0).
    pub discount: f64,
    /// Clamped shipping input (≥ 0).
    pub shipping: f64,
    /// Clamped VAT rate input, in percent (≥ 0).
    pub vat_rate: f64,
    /// `max(0, subtotal − discount + shipping)` — never negative.
    pub taxable_base: f64,
    /// `taxable_base × vat_rate / 100`, rounded to 2 decimals.
    pub vat_amount: f64,
    /// `taxable_base + vat_amount`.
    pub total: f64,
}

// =============================================================================
// Document
// =============================================================================

/// A full receipt or purchase order.
///
/// ## Lifecycle
/// ```text
/// Document::draft() ── edit items/header ── first save ── doc_no assigned
///        │                                      │         (immutable after)
///        └── recalculate() keeps line totals    └── upsert replaces header
///            and the totals breakdown derived       and the full item set
/// ```
///
/// The working document is an explicit value passed through handlers; there
/// is no ambient "current document" state anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Assigned document number, `{PREFIX}-{YYYYMMDD}-{NNNN}`.
    /// Empty string while the document is an unsaved draft.
    pub doc_no: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Receipt or purchase order.
    pub doc_type: DocType,
    /// Issuing party.
    pub seller: Party,
    /// Receiving party.
    pub buyer: Party,
    /// Payment method, free text ("Cash", "Bank transfer", ...).
    pub payment_method: String,
    /// Free-text note printed under the totals.
    pub note: String,
    /// Document currency.
    pub currency: Currency,
    /// Ordered item rows.
    pub items: Vec<LineItem>,
    /// Derived money summary.
    pub totals: TotalsBreakdown,
}

impl Document {
    /// Creates an empty draft. The document number is assigned on first
    /// save (or explicitly), never here.
    pub fn draft(doc_type: DocType, currency: Currency) -> Self {
        Document {
            doc_no: String::new(),
            created_at: Utc::now(),
            doc_type,
            seller: Party::default(),
            buyer: Party::default(),
            payment_method: String::new(),
            note: String::new(),
            currency,
            items: Vec::new(),
            totals: TotalsBreakdown::default(),
        }
    }

    /// True until a document number has been assigned.
    pub fn is_draft(&self) -> bool {
        self.doc_no.is_empty()
    }

    /// Re-derives every line total and the totals breakdown.
    ///
    /// `discount`, `shipping` and `vat_rate` are the current form inputs;
    /// they are clamped inside [`crate::totals::compute`].
    pub fn recalculate(&mut self, discount: f64, shipping: f64, vat_rate: f64) {
        for item in &mut self.items {
            item.recompute_total();
        }
        self.totals = crate::totals::compute(&self.items, discount, shipping, vat_rate);
    }
}

// =============================================================================
// Document Summary
// =============================================================================

/// Reduced projection of a document for recent-documents listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub doc_no: String,
    pub created_at: DateTime<Utc>,
    pub doc_type: DocType,
    /// Buyer name only; full party detail requires a load.
    pub buyer_name: String,
    pub total: f64,
    pub currency: Currency,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_prefix_and_title() {
        assert_eq!(DocType::Receipt.prefix(), "RC");
        assert_eq!(DocType::PurchaseOrder.prefix(), "PO");
        assert_eq!(DocType::PurchaseOrder.title(), "PURCHASE ORDER");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Thb.code(), "THB");
        assert_eq!(Currency::Usd.code(), "USD");
    }

    #[test]
    fn test_line_item_derives_total() {
        let item = LineItem::new("Product A", 2.0, "pcs", 250.0);
        assert_eq!(item.line_total, 500.0);
    }

    #[test]
    fn test_line_item_coerces_on_recompute() {
        let mut item = LineItem::new("Broken", 1.0, "pcs", 10.0);
        item.quantity = f64::NAN;
        item.unit_price = -5.0;
        item.recompute_total();
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.line_total, 0.0);
    }

    #[test]
    fn test_line_item_fractional_quantity() {
        let item = LineItem::new("Consulting", 1.5, "hr", 333.33);
        assert_eq!(item.line_total, 500.0); // 499.995 rounds up
    }

    #[test]
    fn test_draft_has_no_number() {
        let doc = Document::draft(DocType::Receipt, Currency::Thb);
        assert!(doc.is_draft());
        assert!(doc.items.is_empty());
        assert_eq!(doc.totals, TotalsBreakdown::default());
    }

    #[test]
    fn test_recalculate_repairs_stale_line_totals() {
        let mut doc = Document::draft(DocType::Receipt, Currency::Thb);
        doc.items.push(LineItem {
            description: "Tampered".to_string(),
            quantity: 2.0,
            unit: "pcs".to_string(),
            unit_price: 100.0,
            line_total: 999.0, // stale/forged
        });
        doc.recalculate(0.0, 0.0, 7.0);
        assert_eq!(doc.items[0].line_total, 200.0);
        assert_eq!(doc.totals.subtotal, 200.0);
    }

    #[test]
    fn test_serde_enum_wire_format() {
        assert_eq!(
            serde_json::to_string(&DocType::PurchaseOrder).unwrap(),
            "\"purchase_order\""
        );
        assert_eq!(serde_json::to_string(&Currency::Thb).unwrap(), "\"THB\"");
    }
}
