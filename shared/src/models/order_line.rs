//! Order Line Model

use serde::{Deserialize, Serialize};

use super::kibbutz::{Kibbutz, SurchargeKind};
use crate::types::{Quantity, Timestamp};
use crate::util::{empty_string_as_none, lenient_non_negative, null_as_default};

/// Pricing terms copied from the kibbutz when the order line was created
///
/// Later edits to the kibbutz never reprice a line that carries a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub discount_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surcharge_type: SurchargeKind,
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub surcharge_value: f64,
}

impl From<&Kibbutz> for PricingSnapshot {
    fn from(kibbutz: &Kibbutz) -> Self {
        Self {
            discount_percentage: kibbutz.discount_percentage,
            surcharge_type: kibbutz.surcharge_type,
            surcharge_value: kibbutz.surcharge_value,
        }
    }
}

/// One customer's reservation of one bread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub quantity: Quantity,
    /// Kibbutz the line was ordered under (`None` = general customer)
    #[serde(
        default,
        alias = "groupId",
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kibbutz_id: Option<String>,
    #[serde(default)]
    pub fulfilled: bool,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub submitted_at: Timestamp,
    /// Absent on lines written before snapshots existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSnapshot>,
}

impl OrderLine {
    /// New general (no kibbutz) order line
    pub fn new(customer_id: impl Into<String>, quantity: Quantity, submitted_at: Timestamp) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_name: None,
            quantity,
            kibbutz_id: None,
            fulfilled: false,
            paid: false,
            submitted_at,
            pricing: None,
        }
    }

    /// New order line under `kibbutz`, snapshotting its pricing terms
    pub fn for_kibbutz(
        customer_id: impl Into<String>,
        quantity: Quantity,
        kibbutz: &Kibbutz,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            kibbutz_id: Some(kibbutz.id.clone()),
            pricing: Some(PricingSnapshot::from(kibbutz)),
            ..Self::new(customer_id, quantity, submitted_at)
        }
    }
}
