//! Kibbutz Model
//!
//! A kibbutz is a cooperative group a customer may order under. It carries a
//! pricing profile (discount plus one surcharge) and decides which inventory
//! pool its members draw from.

use serde::{Deserialize, Serialize};

use crate::util::{lenient_non_negative, null_as_default};

/// Surcharge kind enum
///
/// Unknown strings decode as [`SurchargeKind::None`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SurchargeKind {
    /// Percentage of the discounted unit price
    Percentage,
    /// Fixed amount added to every unit
    PerUnit,
    /// Fixed amount added once per order, never to the unit price
    PerOrder,
    #[default]
    #[serde(other)]
    None,
}

/// Kibbutz entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kibbutz {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Discount percentage (20 = 20% off the base price)
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub discount_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surcharge_type: SurchargeKind,
    /// Meaning depends on `surcharge_type` (percent, or amount per unit/order)
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub surcharge_value: f64,
    /// Club members share the general pool instead of a reserved allocation
    #[serde(default)]
    pub is_club: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Kibbutz {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discount_percentage: 0.0,
            surcharge_type: SurchargeKind::None,
            surcharge_value: 0.0,
            is_club: false,
            is_active: true,
        }
    }

    pub fn with_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = percentage;
        self
    }

    pub fn with_surcharge(mut self, kind: SurchargeKind, value: f64) -> Self {
        self.surcharge_type = kind;
        self.surcharge_value = value;
        self
    }

    pub fn club(mut self) -> Self {
        self.is_club = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_document() {
        let k: Kibbutz = serde_json::from_str(
            r#"{
                "id": "k1",
                "name": "Degania",
                "discountPercentage": 15,
                "surchargeType": "perOrder",
                "surchargeValue": "5",
                "isClub": true,
                "isActive": false
            }"#,
        )
        .unwrap();

        assert_eq!(k.discount_percentage, 15.0);
        assert_eq!(k.surcharge_type, SurchargeKind::PerOrder);
        assert_eq!(k.surcharge_value, 5.0);
        assert!(k.is_club);
        assert!(!k.is_active);
    }

    #[test]
    fn test_decode_sparse_document() {
        let k: Kibbutz = serde_json::from_str(
            r#"{"id": "k2", "discountPercentage": null, "surchargeType": null}"#,
        )
        .unwrap();

        assert_eq!(k.discount_percentage, 0.0);
        assert_eq!(k.surcharge_type, SurchargeKind::None);
        assert!(!k.is_club);
        assert!(k.is_active);
    }

    #[test]
    fn test_unknown_surcharge_kind_is_none() {
        let k: Kibbutz =
            serde_json::from_str(r#"{"id": "k3", "surchargeType": "weekly"}"#).unwrap();
        assert_eq!(k.surcharge_type, SurchargeKind::None);
    }

    #[test]
    fn test_surcharge_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&SurchargeKind::PerUnit).unwrap(),
            "\"perUnit\""
        );
        assert_eq!(
            serde_json::to_string(&SurchargeKind::None).unwrap(),
            "\"none\""
        );
    }
}
