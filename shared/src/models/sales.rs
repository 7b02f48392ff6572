//! Point-of-sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a completed sale.
///
/// The item reference is weak: `item_id` points at an `InventoryItem` by
/// value, and the name and prices are denormalized so the receipt survives a
/// later deletion of the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price_at_sale: Decimal,
    pub cost_at_sale: Decimal,
}

impl SaleItem {
    pub fn line_total(&self) -> Decimal {
        self.price_at_sale * Decimal::from(self.quantity)
    }

    pub fn line_cost(&self) -> Decimal {
        self.cost_at_sale * Decimal::from(self.quantity)
    }
}

/// A committed checkout transaction. Immutable once created: there is no
/// update or delete path for sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    pub id: Uuid,
    pub items: Vec<SaleItem>,
    pub total_amount: Decimal,
    pub total_profit: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl SaleRecord {
    /// Builds a sale from its lines, computing the derived totals.
    ///
    /// total_amount = Σ quantity × price_at_sale;
    /// total_profit = total_amount - Σ quantity × cost_at_sale.
    pub fn new(items: Vec<SaleItem>, timestamp: DateTime<Utc>) -> Self {
        let total_amount: Decimal = items.iter().map(SaleItem::line_total).sum();
        let total_cost: Decimal = items.iter().map(SaleItem::line_cost).sum();
        Self {
            id: Uuid::new_v4(),
            items,
            total_amount,
            total_profit: total_amount - total_cost,
            timestamp,
        }
    }
}
