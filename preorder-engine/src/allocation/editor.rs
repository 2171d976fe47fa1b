//! Quantity editing
//!
//! While a customer adjusts the quantity input for a bread, the highest
//! value they may reach is the pool's current availability plus what they
//! already saved. A customer can always get back to their own reservation,
//! even after other customers exhausted the pool.

use shared::models::{Bread, Kibbutz};
use shared::{Quantity, QuantityStep};

use super::pool::{available_in, line_pool, pool_for};
use crate::pricing::KibbutzLookup;

/// Highest quantity a customer may set
///
/// `base_available` is the pool's remaining availability (which already
/// excludes the customer's own saved quantity). When the pool is empty the
/// ceiling is exactly `own_saved`.
pub fn effective_ceiling(base_available: Quantity, own_saved: Quantity) -> Quantity {
    let own_saved = own_saved.floor_zero();
    if base_available.half_units() <= 0 {
        own_saved
    } else {
        base_available + own_saved
    }
}

/// Editing ceiling for `customer_id` on `bread`
///
/// An existing line stays in the pool it was ordered from; a new line uses
/// the pool of `kibbutz`.
pub fn ceiling_for<L>(
    bread: &Bread,
    customer_id: &str,
    kibbutz: Option<&Kibbutz>,
    lookup: &L,
) -> Quantity
where
    L: KibbutzLookup + ?Sized,
{
    let (pool, own_saved) = match bread.order_of(customer_id) {
        Some(line) => (line_pool(bread, line, lookup), line.quantity),
        None => (pool_for(bread, kibbutz), Quantity::ZERO),
    };
    effective_ceiling(available_in(bread, &pool, lookup), own_saved)
}

/// Stepper state for one bread's quantity input
///
/// Increments past the ceiling are refused, leaving the value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityEditor {
    value: Quantity,
    saved: Quantity,
    step: QuantityStep,
    ceiling: Quantity,
}

impl QuantityEditor {
    pub fn new(saved: Quantity, step: QuantityStep, ceiling: Quantity) -> Self {
        Self {
            value: saved,
            saved,
            step,
            ceiling,
        }
    }

    /// Editor for `customer_id` on `bread`, starting at their saved quantity
    pub fn for_customer<L>(
        bread: &Bread,
        customer_id: &str,
        kibbutz: Option<&Kibbutz>,
        lookup: &L,
    ) -> Self
    where
        L: KibbutzLookup + ?Sized,
    {
        Self::new(
            bread.saved_quantity_of(customer_id),
            bread.step(),
            ceiling_for(bread, customer_id, kibbutz, lookup),
        )
    }

    pub fn value(&self) -> Quantity {
        self.value
    }

    pub fn saved(&self) -> Quantity {
        self.saved
    }

    pub fn ceiling(&self) -> Quantity {
        self.ceiling
    }

    pub fn step(&self) -> QuantityStep {
        self.step
    }

    /// Whether the input differs from the saved quantity
    pub fn is_dirty(&self) -> bool {
        self.value != self.saved
    }

    pub fn can_increment(&self) -> bool {
        self.value + self.step.as_quantity() <= self.ceiling
    }

    /// Raise the value by one step; `false` (and no change) past the ceiling
    pub fn increment(&mut self) -> bool {
        if !self.can_increment() {
            return false;
        }
        self.value += self.step.as_quantity();
        true
    }

    pub fn can_decrement(&self) -> bool {
        self.value.is_positive()
    }

    /// Lower the value by one step, stopping at zero
    pub fn decrement(&mut self) -> bool {
        if !self.can_decrement() {
            return false;
        }
        self.value = (self.value - self.step.as_quantity()).floor_zero();
        true
    }

    /// Set the value directly, clamped to `0..=ceiling` and snapped down to
    /// the step. Returns the accepted value.
    pub fn set(&mut self, requested: Quantity) -> Quantity {
        let clamped = requested.floor_zero().min(self.ceiling.max(Quantity::ZERO));
        let step = self.step.half_units();
        self.value = Quantity::from_half_units(clamped.half_units() / step * step);
        self.value
    }

    /// Mark the current value as saved
    pub fn commit(&mut self) {
        self.saved = self.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::KibbutzDirectory;
    use shared::models::{BreadKind, OrderLine};

    fn q(n: i64) -> Quantity {
        Quantity::whole(n)
    }

    #[test]
    fn test_ceiling_with_empty_pool_is_saved_quantity() {
        assert_eq!(effective_ceiling(Quantity::ZERO, q(3)), q(3));
        assert_ne!(effective_ceiling(Quantity::ZERO, q(3)), q(4));
        assert_eq!(effective_ceiling(q(-2), q(3)), q(3));
    }

    #[test]
    fn test_ceiling_adds_own_reservation() {
        assert_eq!(effective_ceiling(q(5), q(3)), q(8));
        assert_eq!(effective_ceiling(q(5), Quantity::ZERO), q(5));
    }

    #[test]
    fn test_increment_refused_at_ceiling() {
        let mut editor = QuantityEditor::new(q(3), QuantityStep::Whole, q(3));
        assert!(!editor.can_increment());
        assert!(!editor.increment());
        assert_eq!(editor.value(), q(3));

        assert!(editor.decrement());
        assert_eq!(editor.value(), q(2));
        assert!(editor.is_dirty());
        assert!(editor.increment());
        assert_eq!(editor.value(), q(3));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_half_steps() {
        let mut editor = QuantityEditor::new(Quantity::ZERO, QuantityStep::Half, q(1));
        assert!(editor.increment());
        assert_eq!(editor.value(), Quantity::from_f64(0.5));
        assert!(editor.increment());
        assert_eq!(editor.value(), q(1));
        assert!(!editor.increment());
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut editor = QuantityEditor::new(Quantity::ZERO, QuantityStep::Whole, q(5));
        assert!(!editor.decrement());
        assert_eq!(editor.value(), Quantity::ZERO);
    }

    #[test]
    fn test_set_clamps_and_snaps() {
        let mut editor = QuantityEditor::new(Quantity::ZERO, QuantityStep::Whole, q(4));
        assert_eq!(editor.set(q(10)), q(4));
        assert_eq!(editor.set(Quantity::from_f64(2.5)), q(2));
        assert_eq!(editor.set(q(-1)), Quantity::ZERO);

        let mut soft = QuantityEditor::new(Quantity::ZERO, QuantityStep::Half, q(4));
        assert_eq!(soft.set(Quantity::from_f64(2.5)), Quantity::from_f64(2.5));
    }

    #[test]
    fn test_for_customer_exhausted_pool() {
        let dir = KibbutzDirectory::default();
        let mut bread = Bread::new("b1", "Rye", 10.0).with_total(q(5));
        bread.orders.push(OrderLine::new("c1", q(2), 1));
        bread.orders.push(OrderLine::new("c2", q(3), 2));

        // Pool is 0: c1 may only go back to 2
        let mut editor = QuantityEditor::for_customer(&bread, "c1", None, &dir);
        assert_eq!(editor.saved(), q(2));
        assert_eq!(editor.ceiling(), q(2));
        assert!(!editor.increment());

        // A new customer gets nothing
        let fresh = QuantityEditor::for_customer(&bread, "c3", None, &dir);
        assert_eq!(fresh.ceiling(), Quantity::ZERO);
        assert!(!fresh.can_increment());
    }

    #[test]
    fn test_for_customer_in_kibbutz_pool() {
        let k = Kibbutz::new("k1", "Kfar Giladi");
        let dir = KibbutzDirectory::new(vec![k.clone()]);
        let mut bread = Bread::new("b1", "Challah", 16.0)
            .with_kind(BreadKind::Soft)
            .with_total(q(20))
            .with_allocation("k1", q(4));
        bread
            .orders
            .push(OrderLine::for_kibbutz("c1", Quantity::from_f64(1.5), &k, 1));

        let editor = QuantityEditor::for_customer(&bread, "c1", Some(&k), &dir);
        // 4 - 1.5 = 2.5 left, plus own 1.5
        assert_eq!(editor.ceiling(), q(4));
        assert_eq!(editor.step(), QuantityStep::Half);

        let other = QuantityEditor::for_customer(&bread, "c2", Some(&k), &dir);
        assert_eq!(other.ceiling(), Quantity::from_f64(2.5));
    }
}
