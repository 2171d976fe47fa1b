//! Order line mutations
//!
//! In-memory edits of a bread's order lines. The caller persists the
//! mutated bread; nothing here locks or versions the document, so two
//! customers validated against stale copies can both succeed at the storage
//! layer. Callers that need a hard guarantee re-run
//! [`set_customer_quantity`] inside a transactional read-modify-write.

use shared::models::{Bread, Kibbutz, OrderLine, PricingSnapshot};
use shared::{Quantity, Timestamp};

use crate::allocation::ceiling_for;
use crate::pricing::KibbutzLookup;
use crate::utils::validation::require_quantity;
use crate::utils::{PreorderError, PreorderResult};

/// What a mutation did to the customer's order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderChange {
    Created { quantity: Quantity },
    Updated { previous: Quantity, quantity: Quantity },
    Removed { previous: Quantity },
    Unchanged,
}

fn position_of(bread: &Bread, customer_id: &str) -> Option<usize> {
    bread.orders.iter().position(|o| o.customer_id == customer_id)
}

fn not_found(bread: &Bread, customer_id: &str) -> PreorderError {
    PreorderError::OrderLineNotFound {
        bread_id: bread.id.clone(),
        customer_id: customer_id.to_string(),
    }
}

/// Customer sets their quantity for `bread`
///
/// - zero removes the customer's line (or does nothing if there is none)
/// - a new line is created under `kibbutz` with its pricing snapshot; an
///   inactive kibbutz is rejected
/// - an existing line keeps its kibbutz and snapshot, only the quantity
///   changes
///
/// Raising the quantity above the editing ceiling is rejected; lowering it
/// is always allowed.
pub fn set_customer_quantity<L>(
    bread: &mut Bread,
    customer_id: &str,
    kibbutz: Option<&Kibbutz>,
    quantity: Quantity,
    lookup: &L,
    now: Timestamp,
) -> PreorderResult<OrderChange>
where
    L: KibbutzLookup + ?Sized,
{
    require_quantity(bread, quantity, "quantity")?;

    let existing = position_of(bread, customer_id);
    let saved = existing
        .map(|i| bread.orders[i].quantity)
        .unwrap_or_default();

    if quantity.is_zero() {
        return Ok(match existing {
            Some(i) => {
                bread.orders.remove(i);
                tracing::debug!(bread_id = %bread.id, customer_id, "Order line removed");
                OrderChange::Removed { previous: saved }
            }
            None => OrderChange::Unchanged,
        });
    }

    if quantity == saved {
        return Ok(OrderChange::Unchanged);
    }

    if existing.is_none()
        && let Some(k) = kibbutz.filter(|k| !k.is_active)
    {
        return Err(PreorderError::KibbutzInactive(k.id.clone()));
    }

    if quantity > saved {
        let ceiling = ceiling_for(bread, customer_id, kibbutz, lookup);
        if quantity > ceiling {
            tracing::debug!(
                bread_id = %bread.id,
                customer_id,
                requested = %quantity,
                ceiling = %ceiling,
                "Quantity above ceiling refused"
            );
            return Err(PreorderError::ExceedsAvailable {
                bread_id: bread.id.clone(),
                requested: quantity,
                ceiling,
            });
        }
    }

    match existing {
        Some(i) => {
            bread.orders[i].quantity = quantity;
            tracing::debug!(bread_id = %bread.id, customer_id, quantity = %quantity, "Order line updated");
            Ok(OrderChange::Updated {
                previous: saved,
                quantity,
            })
        }
        None => {
            let line = match kibbutz {
                Some(k) => OrderLine::for_kibbutz(customer_id, quantity, k, now),
                None => OrderLine::new(customer_id, quantity, now),
            };
            bread.orders.push(line);
            tracing::debug!(bread_id = %bread.id, customer_id, quantity = %quantity, "Order line created");
            Ok(OrderChange::Created { quantity })
        }
    }
}

/// Administrator sets a customer's quantity, bypassing the ceiling
///
/// The line must exist; zero removes it.
pub fn admin_set_quantity(
    bread: &mut Bread,
    customer_id: &str,
    quantity: Quantity,
) -> PreorderResult<OrderChange> {
    require_quantity(bread, quantity, "quantity")?;
    let i = position_of(bread, customer_id).ok_or_else(|| not_found(bread, customer_id))?;
    let previous = bread.orders[i].quantity;

    if quantity.is_zero() {
        bread.orders.remove(i);
        return Ok(OrderChange::Removed { previous });
    }
    if quantity == previous {
        return Ok(OrderChange::Unchanged);
    }

    bread.orders[i].quantity = quantity;
    if bread.ordered_quantity() > bread.total_available {
        tracing::warn!(
            bread_id = %bread.id,
            customer_id,
            ordered = %bread.ordered_quantity(),
            total = %bread.total_available,
            "Administrator override leaves bread oversold"
        );
    }
    Ok(OrderChange::Updated { previous, quantity })
}

pub fn set_fulfilled(bread: &mut Bread, customer_id: &str, fulfilled: bool) -> PreorderResult<()> {
    let i = position_of(bread, customer_id).ok_or_else(|| not_found(bread, customer_id))?;
    bread.orders[i].fulfilled = fulfilled;
    Ok(())
}

pub fn set_paid(bread: &mut Bread, customer_id: &str, paid: bool) -> PreorderResult<()> {
    let i = position_of(bread, customer_id).ok_or_else(|| not_found(bread, customer_id))?;
    bread.orders[i].paid = paid;
    Ok(())
}

/// Administrator deletes a customer's line, returning it
pub fn remove_order(bread: &mut Bread, customer_id: &str) -> PreorderResult<OrderLine> {
    let i = position_of(bread, customer_id).ok_or_else(|| not_found(bread, customer_id))?;
    Ok(bread.orders.remove(i))
}

/// Copy the live kibbutz pricing onto legacy lines that lack a snapshot
///
/// Lines whose kibbutz is unknown are left alone. Returns how many lines
/// were repaired.
pub fn backfill_pricing_snapshots<L>(bread: &mut Bread, lookup: &L) -> usize
where
    L: KibbutzLookup + ?Sized,
{
    let mut repaired = 0;
    for line in bread.orders.iter_mut().filter(|l| l.pricing.is_none()) {
        let Some(kibbutz) = line.kibbutz_id.as_deref().and_then(|id| lookup.get_kibbutz(id)) else {
            continue;
        };
        line.pricing = Some(PricingSnapshot::from(kibbutz));
        repaired += 1;
    }

    if repaired > 0 {
        tracing::info!(bread_id = %bread.id, repaired, "Backfilled pricing snapshots");
    }
    repaired
}
