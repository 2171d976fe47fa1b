//! Common types for the shared crate
//!
//! [`Quantity`] is a fixed-point count of half units. Soft breads are sold in
//! 0.5 steps and everything else in whole units, so storing half units as an
//! integer makes every increment, sum and ceiling comparison exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Quantity of bread in half units
///
/// Serialized as a plain JSON number (`2`, `1.5`). Decoding is lenient:
/// `null`, non-numeric and negative values become zero, fractions are
/// rounded to the nearest half unit, and values above [`Quantity::MAX`] are
/// capped. Arithmetic saturates instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Largest decoded quantity (one trillion units)
    pub const MAX: Quantity = Quantity(2_000_000_000_000);

    #[inline]
    pub const fn from_half_units(half_units: i64) -> Self {
        Quantity(half_units)
    }

    /// Whole units (`Quantity::whole(3)` is three loaves)
    #[inline]
    pub const fn whole(units: i64) -> Self {
        Quantity(units.saturating_mul(2))
    }

    /// Nearest half unit, capped at `±MAX`; non-finite input is zero
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Quantity::ZERO;
        }
        let max = Quantity::MAX.0 as f64;
        Quantity((value * 2.0).round().clamp(-max, max) as i64)
    }

    #[inline]
    pub const fn half_units(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(2)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Clamp negative results of pool arithmetic to zero
    #[inline]
    pub const fn floor_zero(self) -> Self {
        if self.0 < 0 { Quantity::ZERO } else { self }
    }

    /// Whether this quantity can be reached from zero in `step` increments
    #[inline]
    pub const fn is_multiple_of(self, step: QuantityStep) -> bool {
        self.0 % step.half_units() == 0
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        iter.fold(Quantity::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Quantity {
        iter.copied().sum()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}", self.to_f64())
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 2 == 0 {
            serializer.serialize_i64(self.0 / 2)
        } else {
            serializer.serialize_f64(self.to_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::util::lenient_non_negative(deserializer).map(Quantity::from_f64)
    }
}

/// Increment size for a bread's quantity input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityStep {
    /// One whole unit
    Whole,
    /// Half a unit (soft breads)
    Half,
}

impl QuantityStep {
    #[inline]
    pub const fn half_units(self) -> i64 {
        match self {
            QuantityStep::Whole => 2,
            QuantityStep::Half => 1,
        }
    }

    #[inline]
    pub const fn as_quantity(self) -> Quantity {
        Quantity::from_half_units(self.half_units())
    }
}
