//! Order Total Calculator
//!
//! Line totals and revenue aggregation. A per-order surcharge is added once
//! per order line total, and once per customer in aggregates: summing line
//! totals across a customer's breads would charge it once per bread.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use shared::Quantity;
use shared::models::{Bread, OrderLine};

use super::calculator::{PricingProfile, calculate_display_price};
use crate::money::{add_saturating, mul_saturating};
use super::lookup::{KibbutzLookup, PricedLine};

/// `unit price * quantity`, without any per-order surcharge
pub fn line_subtotal(base_price: f64, profile: Option<&PricingProfile>, quantity: Quantity) -> Decimal {
    mul_saturating(
        calculate_display_price(base_price, profile).display_price,
        quantity.to_decimal(),
    )
}

/// Amount owed for a single order line
///
/// The per-order surcharge is added once, and only when both the surcharge
/// value and the quantity are positive.
pub fn order_line_total(
    base_price: f64,
    profile: Option<&PricingProfile>,
    quantity: Quantity,
) -> Decimal {
    let subtotal = line_subtotal(base_price, profile, quantity);
    let per_order = profile.map(PricingProfile::per_order_surcharge).unwrap_or_default();

    if per_order > Decimal::ZERO && quantity.is_positive() {
        add_saturating(subtotal, per_order)
    } else {
        subtotal
    }
}

/// Line total for a stored order line of `bread`
pub fn stored_line_total<L>(bread: &Bread, line: &OrderLine, lookup: &L) -> Decimal
where
    L: KibbutzLookup + ?Sized,
{
    let profile = PricedLine::classify(line).profile(lookup);
    order_line_total(bread.base_price, profile.as_ref(), line.quantity)
}

/// One order line as an input to revenue aggregation
#[derive(Debug, Clone)]
pub struct RevenueLine<'a> {
    pub customer_id: &'a str,
    pub kibbutz_id: Option<&'a str>,
    pub base_price: f64,
    pub quantity: Quantity,
    pub profile: Option<PricingProfile>,
}

impl<'a> RevenueLine<'a> {
    /// Revenue input for a stored order line of `bread`
    pub fn from_stored<L>(bread: &'a Bread, line: &'a OrderLine, lookup: &L) -> Self
    where
        L: KibbutzLookup + ?Sized,
    {
        Self {
            customer_id: &line.customer_id,
            kibbutz_id: line.kibbutz_id.as_deref(),
            base_price: bread.base_price,
            quantity: line.quantity,
            profile: PricedLine::classify(line).profile(lookup),
        }
    }
}

/// Aggregated amount owed by one customer under one kibbutz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTotal {
    pub customer_id: String,
    pub kibbutz_id: Option<String>,
    /// Sum of line subtotals
    pub subtotal: Decimal,
    /// Per-order surcharge, charged once for the whole group of lines
    pub per_order_surcharge: Decimal,
    pub total: Decimal,
    pub line_count: usize,
}

/// Revenue across many order lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueSummary {
    /// Ordered by customer ID, then kibbutz ID
    pub customers: Vec<CustomerTotal>,
    pub total: Decimal,
}

/// Aggregate revenue, grouping lines by customer and kibbutz
///
/// Per-line subtotals are summed without the per-order surcharge; the
/// surcharge is then added once per group. When a customer's lines carry
/// different per-order values (the kibbutz changed between orders), the
/// largest one is charged.
pub fn revenue_across_orders<'a, I>(lines: I) -> RevenueSummary
where
    I: IntoIterator<Item = RevenueLine<'a>>,
{
    let mut groups: BTreeMap<(&'a str, Option<&'a str>), CustomerTotal> = BTreeMap::new();

    for line in lines {
        let entry = groups
            .entry((line.customer_id, line.kibbutz_id))
            .or_insert_with(|| CustomerTotal {
                customer_id: line.customer_id.to_string(),
                kibbutz_id: line.kibbutz_id.map(str::to_string),
                subtotal: Decimal::ZERO,
                per_order_surcharge: Decimal::ZERO,
                total: Decimal::ZERO,
                line_count: 0,
            });

        entry.subtotal = add_saturating(
            entry.subtotal,
            line_subtotal(line.base_price, line.profile.as_ref(), line.quantity),
        );
        entry.line_count += 1;

        if line.quantity.is_positive() {
            let per_order = line
                .profile
                .as_ref()
                .map(PricingProfile::per_order_surcharge)
                .unwrap_or_default();
            entry.per_order_surcharge = entry.per_order_surcharge.max(per_order);
        }
    }

    let mut total = Decimal::ZERO;
    let customers = groups
        .into_values()
        .map(|mut c| {
            c.total = add_saturating(c.subtotal, c.per_order_surcharge);
            total = add_saturating(total, c.total);
            c
        })
        .collect();

    RevenueSummary { customers, total }
}

/// Revenue of every order line on every bread of a sale
pub fn sale_revenue<L>(breads: &[Bread], lookup: &L) -> RevenueSummary
where
    L: KibbutzLookup + ?Sized,
{
    revenue_across_orders(breads.iter().flat_map(|bread| {
        bread
            .orders
            .iter()
            .map(move |line| RevenueLine::from_stored(bread, line, lookup))
    }))
}
