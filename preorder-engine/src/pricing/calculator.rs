//! Unit Price Calculator
//!
//! Turns a base price and a kibbutz pricing profile into the per-unit price
//! shown to the customer. Uses rust_decimal for precise calculations.

use rust_decimal::prelude::*;
use shared::models::{Kibbutz, PricingSnapshot, SurchargeKind};

use crate::money::{add_saturating, mul_saturating, to_decimal, to_non_negative, to_percentage};

/// Surcharge with its value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Surcharge {
    #[default]
    None,
    /// Percent of the discounted unit price
    Percentage(Decimal),
    /// Amount added to every unit
    PerUnit(Decimal),
    /// Amount added once per order, never part of the unit price
    PerOrder(Decimal),
}

/// Pricing terms applied on top of a bread's base price
///
/// Built from a [`PricingSnapshot`] or a live [`Kibbutz`]. The discount is
/// clamped to `0..=100` and the surcharge value to `>= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingProfile {
    pub discount_percentage: Decimal,
    pub surcharge: Surcharge,
}

impl PricingProfile {
    pub fn from_terms(discount_percentage: f64, kind: SurchargeKind, value: f64) -> Self {
        let value = to_non_negative(value);
        let surcharge = match kind {
            SurchargeKind::None => Surcharge::None,
            SurchargeKind::Percentage => Surcharge::Percentage(value),
            SurchargeKind::PerUnit => Surcharge::PerUnit(value),
            SurchargeKind::PerOrder => Surcharge::PerOrder(value),
        };
        Self {
            discount_percentage: to_percentage(discount_percentage),
            surcharge,
        }
    }

    #[inline]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > Decimal::ZERO
    }

    /// Flat amount owed once per order (zero unless the surcharge is per-order)
    pub fn per_order_surcharge(&self) -> Decimal {
        match self.surcharge {
            Surcharge::PerOrder(value) => value,
            _ => Decimal::ZERO,
        }
    }
}

impl From<&PricingSnapshot> for PricingProfile {
    fn from(snapshot: &PricingSnapshot) -> Self {
        Self::from_terms(
            snapshot.discount_percentage,
            snapshot.surcharge_type,
            snapshot.surcharge_value,
        )
    }
}

impl From<&Kibbutz> for PricingProfile {
    fn from(kibbutz: &Kibbutz) -> Self {
        Self::from_terms(
            kibbutz.discount_percentage,
            kibbutz.surcharge_type,
            kibbutz.surcharge_value,
        )
    }
}

/// Customer-visible unit price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrice {
    /// Per-unit price after discount and per-unit surcharges
    pub display_price: Decimal,
    /// The unmodified base price, for a struck-through display
    pub original_price: Decimal,
    pub has_discount: bool,
}

/// Per-unit price under `profile`
///
/// Order: discount first, then the surcharge. A per-order surcharge is not
/// part of the unit price.
pub fn unit_price(base_price: Decimal, profile: &PricingProfile) -> Decimal {
    let mut price = base_price;

    if profile.has_discount() {
        price *= Decimal::ONE - profile.discount_percentage / Decimal::ONE_HUNDRED;
    }

    match profile.surcharge {
        Surcharge::Percentage(value) => {
            price = mul_saturating(price, Decimal::ONE + value / Decimal::ONE_HUNDRED);
        }
        Surcharge::PerUnit(value) => {
            price = add_saturating(price, value);
        }
        Surcharge::PerOrder(_) | Surcharge::None => {}
    }

    price
}

/// Display price for a bread under an optional pricing profile
///
/// No profile means the base price with no discount.
pub fn calculate_display_price(base_price: f64, profile: Option<&PricingProfile>) -> DisplayPrice {
    let original_price = to_decimal(base_price);

    match profile {
        Some(profile) => DisplayPrice {
            display_price: unit_price(original_price, profile),
            original_price,
            has_discount: profile.has_discount(),
        },
        None => DisplayPrice {
            display_price: original_price,
            original_price,
            has_discount: false,
        },
    }
}
