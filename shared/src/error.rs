//! Unified error codes for the pre-order workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order line errors
//! - 6xxx: Bread and kibbutz errors
//! - 9xxx: System errors (archive, config, IO)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Serialized as a bare `u16` so the storefront can switch on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    ValidationFailed = 2,
    InvalidFormat = 6,

    // ==================== 4xxx: Order line ====================
    OrderLineNotFound = 4006,
    QuantityExceedsAvailable = 4101,
    InvalidQuantityStep = 4102,
    KibbutzInactive = 4103,

    // ==================== 6xxx: Bread / Kibbutz ====================
    BreadInvalidPrice = 6002,
    BreadOverAllocated = 6004,
    KibbutzInvalidDiscount = 6302,
    KibbutzInvalidSurcharge = 6303,

    // ==================== 9xxx: System ====================
    IoError = 9001,
    ArchiveChainBroken = 9101,
    ConfigInvalid = 9201,
}

impl ErrorCode {
    /// Numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::OrderLineNotFound => "Order line not found",
            ErrorCode::QuantityExceedsAvailable => "Requested quantity exceeds availability",
            ErrorCode::InvalidQuantityStep => "Quantity is not a multiple of the bread's step",
            ErrorCode::KibbutzInactive => "Kibbutz is not accepting new orders",
            ErrorCode::BreadInvalidPrice => "Invalid bread price",
            ErrorCode::BreadOverAllocated => "Kibbutz allocations exceed total available",
            ErrorCode::KibbutzInvalidDiscount => "Discount percentage must be between 0 and 100",
            ErrorCode::KibbutzInvalidSurcharge => "Surcharge value must be non-negative",
            ErrorCode::IoError => "IO error",
            ErrorCode::ArchiveChainBroken => "Sale archive hash chain is broken",
            ErrorCode::ConfigInvalid => "Invalid configuration",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a `u16` does not name a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),

            4006 => Ok(ErrorCode::OrderLineNotFound),
            4101 => Ok(ErrorCode::QuantityExceedsAvailable),
            4102 => Ok(ErrorCode::InvalidQuantityStep),
            4103 => Ok(ErrorCode::KibbutzInactive),

            6002 => Ok(ErrorCode::BreadInvalidPrice),
            6004 => Ok(ErrorCode::BreadOverAllocated),
            6302 => Ok(ErrorCode::KibbutzInvalidDiscount),
            6303 => Ok(ErrorCode::KibbutzInvalidSurcharge),

            9001 => Ok(ErrorCode::IoError),
            9101 => Ok(ErrorCode::ArchiveChainBroken),
            9201 => Ok(ErrorCode::ConfigInvalid),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::QuantityExceedsAvailable,
            ErrorCode::BreadOverAllocated,
            ErrorCode::ArchiveChainBroken,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidQuantityStep).unwrap();
        assert_eq!(json, "4102");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::InvalidQuantityStep);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::KibbutzInactive.to_string(), "E4103");
    }
}
