//! Shared types for the bread pre-order workspace
//!
//! Record types read from and written to the document store by the
//! storefront, the fixed-point [`Quantity`] type and the error codes
//! surfaced to callers. No behavior lives here beyond construction,
//! conversion and lenient decoding of stored documents.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use error::ErrorCode;
pub use serde::{Deserialize, Serialize};
pub use types::{Quantity, QuantityStep, Timestamp};
