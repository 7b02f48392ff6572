//! Purchase order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a purchase order.
///
/// One-way state machine: `Ordered -> Received` xor `Ordered -> Cancelled`.
/// `Received` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Ordered => "ordered",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Received | PurchaseOrderStatus::Cancelled
        )
    }
}

/// One line of a purchase order. Weak item reference, same as sale lines:
/// the name is denormalized for display after an item deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderItem {
    pub item_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

impl PurchaseOrderItem {
    pub fn line_cost(&self) -> Decimal {
        self.unit_cost * Decimal::from(self.quantity)
    }
}

/// A supplier order. `total_cost` is computed once at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub supplier: String,
    pub date: DateTime<Utc>,
    pub status: PurchaseOrderStatus,
    pub items: Vec<PurchaseOrderItem>,
    pub total_cost: Decimal,
    pub notes: Option<String>,
}

impl PurchaseOrder {
    pub fn new(supplier: String, items: Vec<PurchaseOrderItem>, notes: Option<String>) -> Self {
        let total_cost: Decimal = items.iter().map(PurchaseOrderItem::line_cost).sum();
        Self {
            id: Uuid::new_v4(),
            supplier,
            date: Utc::now(),
            status: PurchaseOrderStatus::Ordered,
            items,
            total_cost,
            notes,
        }
    }
}
