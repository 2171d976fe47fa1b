//! Pricing Module
//!
//! Display prices, order line totals and revenue aggregation under kibbutz
//! discount and surcharge terms.

mod calculator;
mod lookup;
mod order_calculator;

pub use calculator::*;
pub use lookup::*;
pub use order_calculator::*;
