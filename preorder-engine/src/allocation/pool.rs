//! Inventory pools
//!
//! A bread's stock is split into a general pool and one reserved pool per
//! non-club kibbutz that has an allocation entry. Club kibbutzim and general
//! customers share the general pool. Allocations to kibbutzim the lookup
//! does not know are carved out like non-club ones.

use std::collections::BTreeMap;

use shared::Quantity;
use shared::models::{Bread, Kibbutz, OrderLine};

use crate::pricing::KibbutzLookup;

/// Which pool an order draws from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pool {
    General,
    /// Reserved allocation of a non-club kibbutz
    Kibbutz(String),
}

/// Sum of every allocation entry on `bread`, club ones included
pub fn allocated_total(bread: &Bread) -> Quantity {
    bread.group_allocations.values().sum()
}

/// Whether an allocation to `kibbutz_id` is carved out of the general pool
fn is_reserved<L>(kibbutz_id: &str, lookup: &L) -> bool
where
    L: KibbutzLookup + ?Sized,
{
    lookup.get_kibbutz(kibbutz_id).is_none_or(|k| !k.is_club)
}

/// Pool a customer under `kibbutz` (or no kibbutz) draws from on `bread`
///
/// A non-club kibbutz without an allocation entry on this bread orders from
/// the general pool.
pub fn pool_for(bread: &Bread, kibbutz: Option<&Kibbutz>) -> Pool {
    match kibbutz {
        Some(k) if !k.is_club && bread.group_allocations.contains_key(&k.id) => {
            Pool::Kibbutz(k.id.clone())
        }
        _ => Pool::General,
    }
}

/// Pool an existing order line draws from
pub fn line_pool<L>(bread: &Bread, line: &OrderLine, lookup: &L) -> Pool
where
    L: KibbutzLookup + ?Sized,
{
    match line.kibbutz_id.as_deref() {
        Some(id) if bread.group_allocations.contains_key(id) && is_reserved(id, lookup) => {
            Pool::Kibbutz(id.to_string())
        }
        _ => Pool::General,
    }
}

/// `total_available` minus non-club allocations, floored at zero
pub fn general_pool_capacity<L>(bread: &Bread, lookup: &L) -> Quantity
where
    L: KibbutzLookup + ?Sized,
{
    let reserved: Quantity = bread
        .group_allocations
        .iter()
        .filter(|(id, _)| is_reserved(id, lookup))
        .map(|(_, q)| *q)
        .sum();

    if reserved > bread.total_available {
        tracing::warn!(
            bread_id = %bread.id,
            reserved = %reserved,
            total = %bread.total_available,
            "Kibbutz allocations exceed total available, general pool is empty"
        );
    }

    (bread.total_available - reserved).floor_zero()
}

/// Units still orderable from the general pool
///
/// Capacity minus every order line that draws on the general pool.
pub fn available_general<L>(bread: &Bread, lookup: &L) -> Quantity
where
    L: KibbutzLookup + ?Sized,
{
    let consumed: Quantity = bread
        .orders
        .iter()
        .filter(|line| line_pool(bread, line, lookup) == Pool::General)
        .map(|line| line.quantity)
        .sum();

    (general_pool_capacity(bread, lookup) - consumed).floor_zero()
}

/// Units still orderable from `kibbutz_id`'s reserved allocation
///
/// Allocation minus every line on this bread ordered under that kibbutz,
/// floored at zero. Zero when the kibbutz has no allocation entry.
pub fn available_for_kibbutz(bread: &Bread, kibbutz_id: &str) -> Quantity {
    let allocation = bread
        .group_allocations
        .get(kibbutz_id)
        .copied()
        .unwrap_or_default();

    let consumed: Quantity = bread
        .orders
        .iter()
        .filter(|line| line.kibbutz_id.as_deref() == Some(kibbutz_id))
        .map(|line| line.quantity)
        .sum();

    (allocation - consumed).floor_zero()
}

/// Units available in `pool`
pub fn available_in<L>(bread: &Bread, pool: &Pool, lookup: &L) -> Quantity
where
    L: KibbutzLookup + ?Sized,
{
    match pool {
        Pool::General => available_general(bread, lookup),
        Pool::Kibbutz(id) => available_for_kibbutz(bread, id),
    }
}

/// Units a customer under `kibbutz` (or no kibbutz) may still order
pub fn available_for<L>(bread: &Bread, kibbutz: Option<&Kibbutz>, lookup: &L) -> Quantity
where
    L: KibbutzLookup + ?Sized,
{
    let pool = pool_for(bread, kibbutz);
    tracing::debug!(bread_id = %bread.id, pool = ?pool, "Resolved inventory pool");
    available_in(bread, &pool, lookup)
}

/// Availability of every pool of a bread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub general_capacity: Quantity,
    pub general: Quantity,
    /// Reserved pools only (club allocations are not listed)
    pub kibbutzim: BTreeMap<String, Quantity>,
}

pub fn availability<L>(bread: &Bread, lookup: &L) -> Availability
where
    L: KibbutzLookup + ?Sized,
{
    let kibbutzim = bread
        .group_allocations
        .keys()
        .filter(|id| is_reserved(id, lookup))
        .map(|id| (id.clone(), available_for_kibbutz(bread, id)))
        .collect();

    Availability {
        general_capacity: general_pool_capacity(bread, lookup),
        general: available_general(bread, lookup),
        kibbutzim,
    }
}
