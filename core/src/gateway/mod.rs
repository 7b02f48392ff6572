//! Remote store gateway
//!
//! The core never talks to the hosted backend directly; everything goes
//! through [`StoreGateway`]. Four collections (inventory, sales, expenses,
//! purchase_orders), each with list-all, insert-one, and where applicable a
//! partial update-by-id or delete-by-id. Any failure surfaces as
//! `AppError::RemoteStore` and the caller reconciles by refetching.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use shared::{ExpenseRecord, InventoryItem, PurchaseOrder, PurchaseOrderStatus, SaleRecord};

use crate::error::AppResult;

pub mod memory;
pub mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

/// Partial field set for an inventory item update. Only the populated fields
/// are written; absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl InventoryItemPatch {
    /// Patch that writes an absolute quantity and bumps the update stamp.
    pub fn quantity(quantity: i32, at: DateTime<Utc>) -> Self {
        Self {
            quantity: Some(quantity),
            last_updated: Some(at),
            ..Self::default()
        }
    }
}

/// Gateway to the hosted store backend.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>>;
    async fn list_sales(&self) -> AppResult<Vec<SaleRecord>>;
    async fn list_expenses(&self) -> AppResult<Vec<ExpenseRecord>>;
    async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrder>>;

    async fn insert_item(&self, item: &InventoryItem) -> AppResult<()>;
    /// Partial update by id. Updating an id with no matching row is not an
    /// error; the store reports zero rows touched and the call succeeds.
    async fn update_item(&self, id: Uuid, patch: &InventoryItemPatch) -> AppResult<()>;
    async fn delete_item(&self, id: Uuid) -> AppResult<()>;

    /// Sales are append-only: no update or delete path exists.
    async fn insert_sale(&self, sale: &SaleRecord) -> AppResult<()>;

    async fn insert_expense(&self, expense: &ExpenseRecord) -> AppResult<()>;
    async fn delete_expense(&self, id: Uuid) -> AppResult<()>;

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> AppResult<()>;
    async fn update_purchase_order_status(
        &self,
        id: Uuid,
        status: PurchaseOrderStatus,
    ) -> AppResult<()>;
}
