//! Money calculation utilities using rust_decimal for precision
//!
//! Records store prices as `f64`. All arithmetic happens on `Decimal`;
//! rounding to cents happens only when converting back to `f64` for output.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Record fields are decoded leniently, so NaN/Infinity only reach here from
/// records built in code. They are logged and treated as zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for output, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Percentage clamped to `0..=100`
#[inline]
pub fn to_percentage(value: f64) -> Decimal {
    to_decimal(value).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Amount clamped to `>= 0`
#[inline]
pub fn to_non_negative(value: f64) -> Decimal {
    to_decimal(value).max(Decimal::ZERO)
}

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// `a * b`, saturating at `Decimal::MAX`/`MIN` instead of panicking
///
/// Decoded prices and quantities are only bounded by what `Decimal` can
/// hold, so their product can overflow.
#[inline]
pub fn mul_saturating(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!(lhs = %a, rhs = %b, "Monetary product overflowed, saturating");
        saturated(a.is_sign_negative() != b.is_sign_negative())
    })
}

/// `a + b`, saturating at `Decimal::MAX`/`MIN` instead of panicking
#[inline]
pub fn add_saturating(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(lhs = %a, rhs = %b, "Monetary sum overflowed, saturating");
        saturated(a.is_sign_negative())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
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
    fn test_rounding_half_up() {
        assert_eq!(to_f64(Decimal::new(10005, 3)), 10.01);
        assert_eq!(to_f64(Decimal::new(10004, 3)), 10.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(to_percentage(150.0), Decimal::ONE_HUNDRED);
        assert_eq!(to_percentage(-3.0), Decimal::ZERO);
        assert_eq!(to_non_negative(-3.0), Decimal::ZERO);
        assert_eq!(to_non_negative(2.5), Decimal::new(25, 1));
    }

    #[test]
    fn test_overflow_saturates() {
        let big = Decimal::MAX;
        assert_eq!(mul_saturating(big, Decimal::from(2)), Decimal::MAX);
        assert_eq!(mul_saturating(big, Decimal::from(-2)), Decimal::MIN);
        assert_eq!(add_saturating(big, Decimal::ONE), Decimal::MAX);
        assert_eq!(add_saturating(Decimal::MIN, Decimal::NEGATIVE_ONE), Decimal::MIN);

        assert_eq!(mul_saturating(Decimal::TEN, Decimal::from(2)), Decimal::from(20));
        assert_eq!(add_saturating(Decimal::TEN, Decimal::from(2)), Decimal::from(12));
        assert!(to_f64(Decimal::MAX) > 7.9e28);
    }
}
