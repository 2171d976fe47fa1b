//! Sale Report
//!
//! Read-only summary of a sale document: per bread the ordered quantity,
//! remaining availability per pool and revenue; per customer the grouped
//! amount owed; and the sale's total revenue.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use shared::models::{Bread, SaleData};
use shared::{Quantity, Timestamp};

use crate::allocation::{allocated_total, availability};
use crate::config::OverAllocationPolicy;
use crate::money::to_f64;
use crate::pricing::{KibbutzDirectory, RevenueLine, revenue_across_orders, sale_revenue};
use crate::utils::{PreorderError, PreorderResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadReport {
    pub id: String,
    pub name: String,
    pub base_price: f64,
    pub total_available: Quantity,
    pub ordered: Quantity,
    pub general_capacity: Quantity,
    pub available_general: Quantity,
    /// Reserved kibbutz pools only
    pub kibbutz_available: BTreeMap<String, Quantity>,
    pub revenue: f64,
    pub over_allocated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReport {
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kibbutz_id: Option<String>,
    pub subtotal: f64,
    pub per_order_surcharge: f64,
    pub total: f64,
    pub line_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReport {
    pub generated_at: Timestamp,
    pub breads: Vec<BreadReport>,
    pub customers: Vec<CustomerReport>,
    pub total_revenue: f64,
}

/// Read a sale document from a JSON file
pub fn load_sale(path: impl AsRef<Path>) -> PreorderResult<SaleData> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let sale: SaleData = serde_json::from_str(&raw)?;
    tracing::info!(
        path = %path.display(),
        breads = sale.breads.len(),
        kibbutzim = sale.kibbutzim.len(),
        "Sale document loaded"
    );
    Ok(sale)
}

fn bread_report(bread: &Bread, directory: &KibbutzDirectory) -> BreadReport {
    let av = availability(bread, directory);
    let revenue = revenue_across_orders(
        bread
            .orders
            .iter()
            .map(|line| RevenueLine::from_stored(bread, line, directory)),
    );

    BreadReport {
        id: bread.id.clone(),
        name: bread.name.clone(),
        base_price: bread.base_price,
        total_available: bread.total_available,
        ordered: bread.ordered_quantity(),
        general_capacity: av.general_capacity,
        available_general: av.general,
        kibbutz_available: av.kibbutzim,
        revenue: to_f64(revenue.total),
        over_allocated: allocated_total(bread) > bread.total_available,
    }
}

/// Build the report for `sale`
///
/// Under [`OverAllocationPolicy::Strict`] the first over-allocated bread
/// fails the report.
pub fn build_sale_report(sale: &SaleData, policy: OverAllocationPolicy) -> PreorderResult<SaleReport> {
    let directory = KibbutzDirectory::new(sale.kibbutzim.iter().cloned());

    let breads: Vec<BreadReport> = sale
        .breads
        .iter()
        .map(|bread| bread_report(bread, &directory))
        .collect();

    if policy == OverAllocationPolicy::Strict
        && let Some((bread, _)) = sale
            .breads
            .iter()
            .zip(&breads)
            .find(|(_, report)| report.over_allocated)
    {
        return Err(PreorderError::OverAllocated {
            bread_id: bread.id.clone(),
            allocated: allocated_total(bread),
            total: bread.total_available,
        });
    }

    let summary = sale_revenue(&sale.breads, &directory);
    let customers = summary
        .customers
        .into_iter()
        .map(|c| CustomerReport {
            customer_id: c.customer_id,
            kibbutz_id: c.kibbutz_id,
            subtotal: to_f64(c.subtotal),
            per_order_surcharge: to_f64(c.per_order_surcharge),
            total: to_f64(c.total),
            line_count: c.line_count,
        })
        .collect();

    Ok(SaleReport {
        generated_at: shared::util::now_millis(),
        breads,
        customers,
        total_revenue: to_f64(summary.total),
    })
}
