//! Engine error type
//!
//! Pure pricing and availability functions never fail; only mutations,
//! validation, archive verification and IO return [`PreorderResult`].
//! Every variant maps to a stable [`ErrorCode`] for the storefront.

use shared::{ErrorCode, Quantity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreorderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Requested {requested} of bread {bread_id} but at most {ceiling} can be reserved")]
    ExceedsAvailable {
        bread_id: String,
        requested: Quantity,
        ceiling: Quantity,
    },

    #[error("Quantity {quantity} is not a valid step for bread {bread_id}")]
    InvalidStep { bread_id: String, quantity: Quantity },

    #[error("Kibbutz {0} is not accepting new orders")]
    KibbutzInactive(String),

    #[error("Customer {customer_id} has no order on bread {bread_id}")]
    OrderLineNotFound {
        bread_id: String,
        customer_id: String,
    },

    #[error("Bread {bread_id} allocates {allocated} to kibbutzim but only offers {total}")]
    OverAllocated {
        bread_id: String,
        allocated: Quantity,
        total: Quantity,
    },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    #[error("Invalid surcharge: {0}")]
    InvalidSurcharge(String),

    #[error("Archive chain broken at index {index}: {reason}")]
    ArchiveChainBroken { index: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sale document: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreorderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::ExceedsAvailable { .. } => ErrorCode::QuantityExceedsAvailable,
            Self::InvalidStep { .. } => ErrorCode::InvalidQuantityStep,
            Self::KibbutzInactive(_) => ErrorCode::KibbutzInactive,
            Self::OrderLineNotFound { .. } => ErrorCode::OrderLineNotFound,
            Self::OverAllocated { .. } => ErrorCode::BreadOverAllocated,
            Self::InvalidPrice(_) => ErrorCode::BreadInvalidPrice,
            Self::InvalidDiscount(_) => ErrorCode::KibbutzInvalidDiscount,
            Self::InvalidSurcharge(_) => ErrorCode::KibbutzInvalidSurcharge,
            Self::ArchiveChainBroken { .. } => ErrorCode::ArchiveChainBroken,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::InvalidFormat,
        }
    }
}

pub type PreorderResult<T> = Result<T, PreorderError>;
