//! In-process store gateway
//!
//! Backs the gateway contract with plain vectors behind a mutex. Used by the
//! test suites and for offline demos. Write failures can be scripted with
//! [`MemoryGateway::fail_after_writes`] to exercise the reconciliation path.

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use shared::{ExpenseRecord, InventoryItem, PurchaseOrder, PurchaseOrderStatus, SaleRecord};

use crate::error::{AppError, AppResult};
use crate::gateway::{InventoryItemPatch, StoreGateway};

#[derive(Debug, Default)]
struct MemoryState {
    inventory: Vec<InventoryItem>,
    sales: Vec<SaleRecord>,
    expenses: Vec<ExpenseRecord>,
    purchase_orders: Vec<PurchaseOrder>,
    /// Number of writes still allowed before every further write fails.
    fail_after_writes: Option<u32>,
}

/// In-memory implementation of [`StoreGateway`]
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backing collections with authoritative rows.
    pub fn seed_inventory(&self, items: Vec<InventoryItem>) {
        self.state.lock().unwrap().inventory = items;
    }

    pub fn seed_sales(&self, sales: Vec<SaleRecord>) {
        self.state.lock().unwrap().sales = sales;
    }

    pub fn seed_expenses(&self, expenses: Vec<ExpenseRecord>) {
        self.state.lock().unwrap().expenses = expenses;
    }

    pub fn seed_purchase_orders(&self, orders: Vec<PurchaseOrder>) {
        self.state.lock().unwrap().purchase_orders = orders;
    }

    /// Allow `writes` more successful writes, then fail every one after.
    pub fn fail_after_writes(&self, writes: u32) {
        self.state.lock().unwrap().fail_after_writes = Some(writes);
    }

    /// Clear any scripted failure.
    pub fn heal(&self) {
        self.state.lock().unwrap().fail_after_writes = None;
    }

    fn check_write(state: &mut MemoryState) -> AppResult<()> {
        match state.fail_after_writes {
            Some(0) => Err(AppError::RemoteStore(
                "injected write failure".to_string(),
            )),
            Some(ref mut remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StoreGateway for MemoryGateway {
    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.state.lock().unwrap().inventory.clone())
    }

    async fn list_sales(&self) -> AppResult<Vec<SaleRecord>> {
        Ok(self.state.lock().unwrap().sales.clone())
    }

    async fn list_expenses(&self) -> AppResult<Vec<ExpenseRecord>> {
        Ok(self.state.lock().unwrap().expenses.clone())
    }

    async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrder>> {
        Ok(self.state.lock().unwrap().purchase_orders.clone())
    }

    async fn insert_item(&self, item: &InventoryItem) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        state.inventory.push(item.clone());
        Ok(())
    }

    async fn update_item(&self, id: Uuid, patch: &InventoryItemPatch) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        // Zero matching rows is a successful no-op, like PostgREST.
        if let Some(item) = state.inventory.iter_mut().find(|i| i.id == id) {
            if let Some(name) = &patch.name {
                item.name = name.clone();
            }
            if let Some(category) = &patch.category {
                item.category = category.clone();
            }
            if let Some(quantity) = patch.quantity {
                item.quantity = quantity;
            }
            if let Some(cost_price) = patch.cost_price {
                item.cost_price = cost_price;
            }
            if let Some(sales_price) = patch.sales_price {
                item.sales_price = sales_price;
            }
            if let Some(threshold) = patch.low_stock_threshold {
                item.low_stock_threshold = threshold;
            }
            if let Some(last_updated) = patch.last_updated {
                item.last_updated = last_updated;
            }
        }
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        state.inventory.retain(|i| i.id != id);
        Ok(())
    }

    async fn insert_sale(&self, sale: &SaleRecord) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        // Newest first, matching the REST gateway's descending order.
        state.sales.insert(0, sale.clone());
        Ok(())
    }

    async fn insert_expense(&self, expense: &ExpenseRecord) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        state.expenses.insert(0, expense.clone());
        Ok(())
    }

    async fn delete_expense(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        state.expenses.retain(|e| e.id != id);
        Ok(())
    }

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        state.purchase_orders.insert(0, order.clone());
        Ok(())
    }

    async fn update_purchase_order_status(
        &self,
        id: Uuid,
        status: PurchaseOrderStatus,
    ) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_write(&mut state)?;
        if let Some(order) = state.purchase_orders.iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
        Ok(())
    }
}
