//! Sale Archive Model
//!
//! Immutable record of a finished sale. Archives form a hash chain: each
//! record stores the hash of the previous one and its own hash over its
//! content, so a tampered or missing archive is detectable.

use serde::{Deserialize, Serialize};

use super::order_line::PricingSnapshot;
use crate::types::{Quantity, Timestamp};

/// Archived order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedOrderLine {
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kibbutz_id: Option<String>,
    /// Pricing the line was charged under (`None` = general price)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSnapshot>,
    pub fulfilled: bool,
    pub paid: bool,
    pub submitted_at: Timestamp,
    /// Display unit price at archive time
    pub unit_price: f64,
    /// Line total at archive time, per-order surcharge included
    pub line_total: f64,
}

/// Archived bread with its order lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedBread {
    pub bread_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_price: f64,
    pub total_available: Quantity,
    pub orders: Vec<ArchivedOrderLine>,
}

/// One finished sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleArchive {
    pub id: String,
    pub archived_at: Timestamp,
    pub breads: Vec<ArchivedBread>,
    /// Hash of the previous archive (`None` for the first one)
    #[serde(default)]
    pub previous_hash: Option<String>,
    /// SHA-256 over this archive's content and `previous_hash`, hex encoded
    pub hash: String,
}

impl SaleArchive {
    /// Total number of archived order lines
    pub fn order_count(&self) -> usize {
        self.breads.iter().map(|b| b.orders.len()).sum()
    }
}
