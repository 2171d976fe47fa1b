//! Bread Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::order_line::OrderLine;
use crate::types::{Quantity, QuantityStep};
use crate::util::{lenient_non_negative, null_as_default};

/// Bread kind enum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BreadKind {
    /// Sold by the half unit
    Soft,
    #[default]
    #[serde(other)]
    Regular,
}

impl BreadKind {
    pub const fn step(self) -> QuantityStep {
        match self {
            BreadKind::Regular => QuantityStep::Whole,
            BreadKind::Soft => QuantityStep::Half,
        }
    }
}

/// Bread entity (one sellable item of the current sale)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bread {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Undiscounted unit price
    #[serde(
        default,
        rename = "price",
        alias = "basePrice",
        deserialize_with = "lenient_non_negative"
    )]
    pub base_price: f64,
    /// Total units offered in this sale, reserved pools included
    #[serde(default)]
    pub total_available: Quantity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: BreadKind,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Kibbutz ID -> units earmarked for that kibbutz
    #[serde(
        default,
        rename = "kibbutzAllocations",
        alias = "groupAllocations",
        deserialize_with = "null_as_default"
    )]
    pub group_allocations: BTreeMap<String, Quantity>,
    /// Order lines in submission order
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<OrderLine>,
}

fn default_active() -> bool {
    true
}

impl Bread {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            base_price,
            total_available: Quantity::ZERO,
            kind: BreadKind::Regular,
            is_active: true,
            group_allocations: BTreeMap::new(),
            orders: Vec::new(),
        }
    }

    pub fn with_total(mut self, total: Quantity) -> Self {
        self.total_available = total;
        self
    }

    pub fn with_kind(mut self, kind: BreadKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_allocation(mut self, kibbutz_id: impl Into<String>, quantity: Quantity) -> Self {
        self.group_allocations.insert(kibbutz_id.into(), quantity);
        self
    }

    #[inline]
    pub fn step(&self) -> QuantityStep {
        self.kind.step()
    }

    /// Order line owned by `customer_id`, if any
    pub fn order_of(&self, customer_id: &str) -> Option<&OrderLine> {
        self.orders.iter().find(|o| o.customer_id == customer_id)
    }

    /// Quantity `customer_id` has already saved on this bread (zero if none)
    pub fn saved_quantity_of(&self, customer_id: &str) -> Quantity {
        self.order_of(customer_id)
            .map(|o| o.quantity)
            .unwrap_or_default()
    }

    /// Sum of all order line quantities
    pub fn ordered_quantity(&self) -> Quantity {
        self.orders.iter().map(|o| o.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy_field_names() {
        let bread: Bread = serde_json::from_str(
            r#"{
                "id": "b1",
                "name": "Challah",
                "price": "12.5",
                "totalAvailable": 40,
                "kibbutzAllocations": {"k1": 10, "k2": null},
                "orders": null
            }"#,
        )
        .unwrap();

        assert_eq!(bread.base_price, 12.5);
        assert_eq!(bread.total_available, Quantity::whole(40));
        assert_eq!(bread.group_allocations["k1"], Quantity::whole(10));
        assert_eq!(bread.group_allocations["k2"], Quantity::ZERO);
        assert!(bread.orders.is_empty());
        assert_eq!(bread.kind, BreadKind::Regular);
        assert!(bread.is_active);
    }

    #[test]
    fn test_soft_bread_steps_by_half() {
        let bread: Bread =
            serde_json::from_str(r#"{"id": "b2", "kind": "soft", "basePrice": 8}"#).unwrap();
        assert_eq!(bread.step(), QuantityStep::Half);
    }

    #[test]
    fn test_unknown_kind_is_regular() {
        let bread: Bread =
            serde_json::from_str(r#"{"id": "b4", "kind": "sourdough"}"#).unwrap();
        assert_eq!(bread.kind, BreadKind::Regular);
        assert_eq!(bread.step(), QuantityStep::Whole);
    }

    #[test]
    fn test_stored_field_names() {
        let bread = Bread::new("b5", "Rye", 9.5).with_allocation("k1", Quantity::whole(4));
        let json = serde_json::to_value(&bread).unwrap();
        assert_eq!(json["price"], 9.5);
        assert_eq!(json["kibbutzAllocations"]["k1"], 4);
        assert!(json.get("basePrice").is_none());
        assert!(json.get("groupAllocations").is_none());

        let decoded: Bread = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.base_price, 9.5);
        assert_eq!(decoded.group_allocations["k1"], Quantity::whole(4));
    }

    #[test]
    fn test_corrupt_numbers_degrade_to_zero() {
        let bread: Bread = serde_json::from_str(
            r#"{"id": "b3", "basePrice": "n/a", "totalAvailable": "lots"}"#,
        )
        .unwrap();
        assert_eq!(bread.base_price, 0.0);
        assert_eq!(bread.total_available, Quantity::ZERO);
    }
}
