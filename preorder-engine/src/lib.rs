//! Preorder Engine - bread pre-order pricing and availability
//!
//! # Overview
//!
//! - **Pricing** (`pricing`): display prices under kibbutz discount and
//!   surcharge terms, line totals and per-customer revenue
//! - **Allocation** (`allocation`): general and reserved kibbutz pools, the
//!   per-customer editing ceiling and the quantity stepper
//! - **Orders** (`orders`): order line mutations and hash-chained sale
//!   archives
//! - **Report** (`report`): sale summary emitted by `preorder-report`
//!
//! # Layout
//!
//! ```text
//! preorder-engine/src/
//! ├── allocation/    # pools, ceiling, quantity editor
//! ├── orders/        # mutations, archive
//! ├── pricing/       # unit price, totals, kibbutz lookup
//! ├── utils/         # error, logger, validation
//! ├── config.rs
//! ├── money.rs
//! └── report.rs
//! ```
//!
//! Every computation is synchronous and works on records the caller loaded.
//! Kibbutz records are passed in through a [`KibbutzLookup`], usually a
//! [`KibbutzDirectory`] built once per request.

pub mod allocation;
pub mod config;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod report;
pub mod utils;

pub use allocation::{Availability, Pool, QuantityEditor, availability, available_for};
pub use config::{Config, OverAllocationPolicy};
pub use orders::{OrderChange, archive_sale, set_customer_quantity, verify_archive_chain};
pub use pricing::{
    DisplayPrice, KibbutzDirectory, KibbutzLookup, PricedLine, PricingProfile,
    calculate_display_price, order_line_total, revenue_across_orders,
};
pub use report::{SaleReport, build_sale_report, load_sale};
pub use utils::{PreorderError, PreorderResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> PreorderResult<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_with_file(
        Some(config.log_level.as_str()),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}
