//! # Totals Calculator
//!
//! Pure computation from line items + discount/shipping/VAT inputs to a
//! [`TotalsBreakdown`].
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► subtotal = Σ round2(qty × price)                             │
//! │                                                                         │
//! │  discount, shipping, vat_rate ──► clamped to ≥ 0                        │
//! │                                                                         │
//! │  taxable_base = max(0, subtotal − discount + shipping)                  │
//! │  vat_amount   = round2(taxable_base × vat_rate / 100)                   │
//! │  total        = round2(taxable_base + vat_amount)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error conditions: the calculator always returns a value. Negative or
//! non-finite inputs are clamped, not rejected (the documented leniency of
//! the form contract).

use crate::money::{coerce_non_negative, round2};
use crate::types::{LineItem, TotalsBreakdown};

/// Computes the full totals breakdown for a set of line items.
///
/// ## Arguments
/// * `items` - ordered line items; quantity/price are coerced per item
/// * `discount` - amount subtracted from the subtotal (clamped to ≥ 0)
/// * `shipping` - amount added before VAT (clamped to ≥ 0)
/// * `vat_rate` - VAT percentage, e.g. 7.0 for 7% (clamped to ≥ 0)
///
/// ## Guarantees
/// - An empty item list yields an all-zero breakdown (at the given rate).
/// - `taxable_base` is never negative, even when the discount exceeds
///   subtotal + shipping.
/// - Side-effect free; the items slice is not modified (callers wanting the
///   write-back coercion use [`LineItem::recompute_total`] first).
///
/// ## Example
/// ```rust
/// use docket_core::totals::compute;
/// use docket_core::types::LineItem;
///
/// let items = vec![
///     LineItem::new("Product A", 1.0, "pcs", 100.0),
///     LineItem::new("Product B", 2.0, "pcs", 250.0),
/// ];
/// let totals = compute(&items, 0.0, 0.0, 7.0);
/// assert_eq!(totals.subtotal, 600.0);
/// assert_eq!(totals.vat_amount, 42.0);
/// assert_eq!(totals.total, 642.0);
/// ```
pub fn compute(items: &[LineItem], discount: f64, shipping: f64, vat_rate: f64) -> TotalsBreakdown {
    let discount = coerce_non_negative(discount);
    let shipping = coerce_non_negative(shipping);
    let vat_rate = coerce_non_negative(vat_rate);

    // Sum of per-line derived totals; each line is rounded independently so
    // the subtotal matches what the item table displays.
    let subtotal = round2(
        items
            .iter()
            .map(|item| {
                round2(coerce_non_negative(item.quantity) * coerce_non_negative(item.unit_price))
            })
            .sum(),
    );

    let taxable_base = round2((subtotal - discount + shipping).max(0.0));
    let vat_amount = round2(taxable_base * vat_rate / 100.0);
    let total = round2(taxable_base + vat_amount);

    TotalsBreakdown {
        subtotal,
        discount,
        shipping,
        vat_rate,
        taxable_base,
        vat_amount,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: f64, price: f64) -> LineItem {
        LineItem::new("item", qty, "pcs", price)
    }

    #[test]
    fn test_empty_items_all_zero() {
        let totals = compute(&[], 0.0, 0.0, 7.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.shipping, 0.0);
        assert_eq!(totals.vat_amount, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_seven_percent_vat() {
        let items = vec![item(1.0, 100.0), item(2.0, 250.0)];
        let totals = compute(&items, 0.0, 0.0, 7.0);
        assert_eq!(totals.subtotal, 600.0);
        assert_eq!(totals.taxable_base, 600.0);
        assert_eq!(totals.vat_amount, 42.0);
        assert_eq!(totals.total, 642.0);
    }

    #[test]
    fn test_zero_quantity_or_price_is_free() {
        let items = vec![item(0.0, 500.0), item(3.0, 0.0)];
        let totals = compute(&items, 0.0, 0.0, 7.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_discount_and_shipping() {
        let items = vec![item(1.0, 1000.0)];
        let totals = compute(&items, 100.0, 50.0, 7.0);
        assert_eq!(totals.taxable_base, 950.0);
        assert_eq!(totals.vat_amount, 66.5);
        assert_eq!(totals.total, 1016.5);
    }

    #[test]
    fn test_taxable_base_never_negative() {
        let items = vec![item(1.0, 100.0)];
        let totals = compute(&items, 500.0, 0.0, 7.0);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.taxable_base, 0.0);
        assert_eq!(totals.vat_amount, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_negative_inputs_clamped_to_zero() {
        let items = vec![item(1.0, 100.0)];
        let totals = compute(&items, -50.0, -20.0, -7.0);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.shipping, 0.0);
        assert_eq!(totals.vat_rate, 0.0);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_non_finite_item_values_treated_as_zero() {
        let mut bad = item(2.0, 50.0);
        bad.quantity = f64::NAN;
        let items = vec![bad, item(1.0, 100.0)];
        let totals = compute(&items, 0.0, 0.0, 7.0);
        assert_eq!(totals.subtotal, 100.0);
    }

    #[test]
    fn test_per_line_rounding_feeds_subtotal() {
        // 3 × 0.335 = 1.005 → the line rounds as a unit, and the subtotal
        // sums the rounded lines.
        let items = vec![item(3.0, 0.335), item(1.0, 0.10)];
        let totals = compute(&items, 0.0, 0.0, 0.0);
        assert_eq!(totals.subtotal, round2(round2(3.0 * 0.335) + 0.10));
    }
}
