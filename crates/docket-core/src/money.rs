//! # Money Helpers
//!
//! Numeric coercion, rounding, and display formatting for monetary values.
//!
//! ## Why f64 And Not Integer Cents?
//! Quantities on a line item are fractional (1.5 hours, 0.25 kg), and every
//! monetary figure in the document is derived by multiplying a fractional
//! quantity by a unit price and rounding to 2 decimals at that seam. All
//! stored amounts are already-rounded 2-decimal values, so the usual
//! accumulating-float-error argument does not apply: rounding happens once
//! per derived value, never on a running balance.
//!
//! ## The Coercion Rule
//! Form input is lenient by contract: anything that is not a finite,
//! non-negative number becomes 0.0. That leniency is concentrated in
//! [`coerce_non_negative`] so it can be tested directly and tightened later
//! if a strict-validation mode is ever wanted.

// =============================================================================
// Coercion
// =============================================================================

/// Coerces a raw numeric input into a finite, non-negative amount.
///
/// ## Rules
/// - NaN or infinite → 0.0
/// - Negative → 0.0
/// - Anything else passes through unchanged
///
/// ## Example
/// ```rust
/// use docket_core::money::coerce_non_negative;
///
/// assert_eq!(coerce_non_negative(12.5), 12.5);
/// assert_eq!(coerce_non_negative(-3.0), 0.0);
/// assert_eq!(coerce_non_negative(f64::NAN), 0.0);
/// ```
pub fn coerce_non_negative(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Parses a string as a non-negative amount, zeroing anything unparseable.
///
/// This is the form-input edge of the coercion rule: `"abc"` → 0.0,
/// `" 12.5 "` → 12.5, `"-3"` → 0.0.
pub fn parse_non_negative(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(coerce_non_negative)
        .unwrap_or(0.0)
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to 2 decimal places (half away from zero).
///
/// Every derived monetary value (line total, VAT amount, totals) is rounded
/// through this one function.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount with 2 decimals and comma thousands separators.
///
/// ## Example
/// ```rust
/// use docket_core::money::format_amount;
///
/// assert_eq!(format_amount(1234567.5), "1,234,567.50");
/// assert_eq!(format_amount(0.0), "0.00");
/// ```
///
/// ## Note
/// This is for export rendering (HTML totals, PDF totals box). Machine
/// formats (CSV) use plain `{:.2}` without separators.
pub fn format_amount(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    let (int_part, dec_part) = match rendered.split_once('.') {
        Some((i, d)) => (i, d),
        None => (rendered.as_str(), "00"),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, dec_part)
}

// =============================================================================
// Unit Tests
// =============================================================================
