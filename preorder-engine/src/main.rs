use anyhow::Context;
use preorder_engine::{build_sale_report, load_sale, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, logging)
    let config = setup_environment().context("failed to set up environment")?;

    // 2. Sale document: first argument, or SALE_FILE
    let path = std::env::args().nth(1).unwrap_or_else(|| config.sale_file.clone());
    tracing::info!(path = %path, policy = %config.over_allocation, "Building sale report");

    let sale = load_sale(&path).with_context(|| format!("failed to load sale document {path}"))?;

    // 3. Report
    let report = build_sale_report(&sale, config.over_allocation)
        .with_context(|| format!("failed to build report for {path}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
