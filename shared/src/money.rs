//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` on the wire. Totals are computed with `Decimal`
//! internally, then converted back to `f64` rounded to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// `None` for NaN, infinities and magnitudes beyond Decimal's range.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Exact `price × quantity`, `None` when Decimal cannot hold it
pub fn checked_line_total(price: f64, quantity: i64) -> Option<Decimal> {
    to_decimal(price)?.checked_mul(Decimal::from(quantity))
}

/// `price × quantity` as a rounded f64
///
/// Falls back to plain f64 multiplication outside Decimal's range.
pub fn line_total(price: f64, quantity: i64) -> f64 {
    match checked_line_total(price, quantity) {
        Some(total) => to_f64(total),
        None => {
            tracing::debug!(price, quantity, "Line total outside decimal range, using f64");
            price * quantity as f64
        }
    }
}

/// Sum of line totals over `(price, quantity)` pairs
///
/// Exact while every term and the running sum fit in Decimal, f64 otherwise.
pub fn sum_line_totals(lines: impl IntoIterator<Item = (f64, i64)>) -> f64 {
    let mut exact = Some(Decimal::ZERO);
    let mut approx = 0.0_f64;
    for (price, quantity) in lines {
        approx += price * quantity as f64;
        exact = exact.and_then(|sum| sum.checked_add(checked_line_total(price, quantity)?));
    }
    exact.map(to_f64).unwrap_or(approx)
}
