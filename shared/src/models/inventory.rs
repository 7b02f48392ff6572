//! Inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked item in the shop's catalog.
///
/// `quantity` stays non-negative under manual adjustments (they clamp at
/// zero), but checkout is never blocked by insufficient stock, so a sale can
/// drive it below zero until the next restock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub cost_price: Decimal,
    pub sales_price: Decimal,
    pub low_stock_threshold: i32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Quantity at or below the configured threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }

    /// Cost value of the stock on hand.
    pub fn stock_value(&self) -> Decimal {
        self.cost_price * Decimal::from(self.quantity)
    }
}
