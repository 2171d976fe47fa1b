//! Available-quantity accounting
//!
//! General pool, reserved kibbutz pools and the per-customer editing
//! ceiling. All functions are pure and results never go below zero.

mod editor;
mod pool;

pub use editor::*;
pub use pool::*;
