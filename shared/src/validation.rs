//! Validation utilities for Shopkeeper
//!
//! Small, composable checks used by the core's operation inputs. Validation
//! failures here are user-facing form problems; they never reach the remote
//! store.

use rust_decimal::Decimal;

/// Validate a sale or order line quantity (must be strictly positive).
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a currency amount (price, cost, expense) is non-negative.
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a low-stock threshold is non-negative.
pub fn validate_threshold(threshold: i32) -> Result<(), &'static str> {
    if threshold < 0 {
        return Err("Threshold cannot be negative");
    }
    Ok(())
}

/// Validate a required free-text field (supplier, item name, category).
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}
