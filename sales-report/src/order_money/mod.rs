//! Money calculation utilities using rust_decimal for precision
//!
//! Report sums are accumulated as `Decimal` and converted to `f64` once,
//! at the end, so totals do not depend on floating-point summation noise
//! and identical inputs always produce identical bits.

use rust_decimal::prelude::*;

/// Rounding for monetary output values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum accepted order total, tip or discount
pub const MAX_ORDER_AMOUNT: f64 = 1_000_000.0;
/// Maximum accepted unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum accepted quantity per item line
pub const MAX_QUANTITY: u32 = 9999;

/// Convert f64 to Decimal
///
/// NaN and Infinity become zero; finite values beyond the Decimal range
/// saturate to `Decimal::MAX` / `Decimal::MIN`.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value = ?value, "Monetary value not representable");
        match value {
            v if !v.is_finite() => Decimal::ZERO,
            v if v > 0.0 => Decimal::MAX,
            _ => Decimal::MIN,
        }
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `numerator / denominator`, zero when the denominator is zero
#[inline]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Share of `part` in `total` as a percentage (0-100), 0 when total is zero
pub fn percentage(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    // part * 100 may exceed the Decimal range near Decimal::MAX
    let ratio = safe_div(part, total);
    to_f64(ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Keep the first `n` entries of an already-ranked sequence
pub fn top_n<T>(mut ranked: Vec<T>, n: usize) -> Vec<T> {
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(to_decimal(1e30), Decimal::MAX);
        assert_eq!(to_decimal(-1e30), Decimal::MIN);
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(Decimal::from(150), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(Decimal::from(150), Decimal::from(2)), Decimal::from(75));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(Decimal::from(50), Decimal::from(150)), 33.33);
        assert_eq!(percentage(Decimal::from(1), Decimal::ZERO), 0.0);
        assert_eq!(percentage(Decimal::ZERO, Decimal::ZERO), 0.0);
        assert_eq!(percentage(Decimal::MAX, Decimal::MAX), 100.0);
    }

    #[test]
    fn test_top_n() {
        assert_eq!(top_n(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(top_n(vec![1, 2, 3], 10), vec![1, 2, 3]);
        assert!(top_n(Vec::<i32>::new(), 5).is_empty());
    }
}
