//! Input validation helpers
//!
//! Administrator-side checks for bread and kibbutz records before they are
//! saved. The pricing and availability computations never call these: they
//! tolerate whatever is stored and floor their results at zero.

use shared::models::{Bread, Kibbutz};
use shared::Quantity;

use super::error::{PreorderError, PreorderResult};
use crate::allocation::allocated_total;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: bread, kibbutz
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and notes
pub const MAX_NOTE_LEN: usize = 500;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum surcharge value (percent or amount)
pub const MAX_SURCHARGE: f64 = 10_000.0;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> PreorderResult<()> {
    if value.trim().is_empty() {
        return Err(PreorderError::validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(PreorderError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> PreorderResult<()> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(PreorderError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        )));
    }
    Ok(())
}

/// Non-negative and on the bread's step
pub(crate) fn require_quantity(bread: &Bread, quantity: Quantity, field: &str) -> PreorderResult<()> {
    if quantity.half_units() < 0 {
        return Err(PreorderError::validation(format!(
            "{field} must be non-negative, got {quantity}"
        )));
    }
    if !quantity.is_multiple_of(bread.step()) {
        return Err(PreorderError::InvalidStep {
            bread_id: bread.id.clone(),
            quantity,
        });
    }
    Ok(())
}

// ── Records ─────────────────────────────────────────────────────────

/// Validate a bread record before an administrator saves it
///
/// Over-allocation (`Σ allocations > total_available`) is rejected here.
pub fn validate_bread(bread: &Bread) -> PreorderResult<()> {
    validate_required_text(&bread.id, "id", MAX_NAME_LEN)?;
    validate_required_text(&bread.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&bread.description, "description", MAX_NOTE_LEN)?;

    if !bread.base_price.is_finite() {
        return Err(PreorderError::InvalidPrice(format!(
            "price must be a finite number, got {}",
            bread.base_price
        )));
    }
    if bread.base_price < 0.0 {
        return Err(PreorderError::InvalidPrice(format!(
            "price must be non-negative, got {}",
            bread.base_price
        )));
    }
    if bread.base_price > MAX_PRICE {
        return Err(PreorderError::InvalidPrice(format!(
            "price exceeds maximum allowed ({MAX_PRICE}), got {}",
            bread.base_price
        )));
    }

    require_quantity(bread, bread.total_available, "totalAvailable")?;
    for (kibbutz_id, quantity) in &bread.group_allocations {
        require_quantity(bread, *quantity, &format!("allocation for {kibbutz_id}"))?;
    }

    let allocated = allocated_total(bread);
    if allocated > bread.total_available {
        return Err(PreorderError::OverAllocated {
            bread_id: bread.id.clone(),
            allocated,
            total: bread.total_available,
        });
    }

    Ok(())
}

/// Validate a kibbutz record before an administrator saves it
pub fn validate_kibbutz(kibbutz: &Kibbutz) -> PreorderResult<()> {
    validate_required_text(&kibbutz.id, "id", MAX_NAME_LEN)?;
    validate_required_text(&kibbutz.name, "name", MAX_NAME_LEN)?;

    let d = kibbutz.discount_percentage;
    if !d.is_finite() || !(0.0..=100.0).contains(&d) {
        return Err(PreorderError::InvalidDiscount(format!(
            "discountPercentage must be between 0 and 100, got {d}"
        )));
    }

    let s = kibbutz.surcharge_value;
    if !s.is_finite() || s < 0.0 {
        return Err(PreorderError::InvalidSurcharge(format!(
            "surchargeValue must be non-negative, got {s}"
        )));
    }
    if s > MAX_SURCHARGE {
        return Err(PreorderError::InvalidSurcharge(format!(
            "surchargeValue exceeds maximum allowed ({MAX_SURCHARGE}), got {s}"
        )));
    }

    Ok(())
}
