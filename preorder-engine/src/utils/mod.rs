//! Utility modules: error type, logging, record validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{PreorderError, PreorderResult};
