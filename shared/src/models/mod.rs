//! Data models
//!
//! Documents as the storefront stores them: camelCase field names, numeric
//! fields decoded leniently (see [`crate::util`]). IDs are opaque strings.

pub mod bread;
pub mod kibbutz;
pub mod order_line;
pub mod sale;
pub mod sale_archive;

// Re-exports
pub use bread::*;
pub use kibbutz::*;
pub use order_line::*;
pub use sale::*;
pub use sale_archive::*;
