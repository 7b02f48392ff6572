//! In-memory state and reconciliation root
//!
//! [`RetailStore`] owns the local snapshot of the four entity collections
//! and the gateway to the hosted backend. Business transactions follow a
//! two-phase apply: stage the delta locally for instant feedback, then
//! commit it remotely; if any remote write fails, the optimistic delta is
//! discarded wholesale by refetching authoritative state. There is never a
//! field-level rollback.
//!
//! The execution model is a single operator on a UI thread: operations take
//! `&mut self`, run to completion one at a time, and hold no locks.

use std::sync::Arc;

use shared::{ExpenseRecord, InventoryItem, PurchaseOrder, SaleRecord, Session};

use crate::error::{AppError, AppResult};
use crate::gateway::StoreGateway;

/// Local copies of the four collections, newest-first where the backing
/// store orders them that way.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub inventory: Vec<InventoryItem>,
    pub sales: Vec<SaleRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub purchase_orders: Vec<PurchaseOrder>,
}

/// The reconciliation core
pub struct RetailStore {
    gateway: Arc<dyn StoreGateway>,
    snapshots: Snapshots,
}

impl RetailStore {
    /// Create a store with empty snapshots. Call [`RetailStore::refresh_all`]
    /// to load authoritative state before serving reads.
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self {
            gateway,
            snapshots: Snapshots::default(),
        }
    }

    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.snapshots.inventory
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.snapshots.sales
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.snapshots.expenses
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        &self.snapshots.purchase_orders
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn StoreGateway> {
        &self.gateway
    }

    pub(crate) fn snapshots_mut(&mut self) -> &mut Snapshots {
        &mut self.snapshots
    }

    /// Replace every snapshot with a fresh authoritative read.
    pub async fn refresh_all(&mut self) -> AppResult<()> {
        let inventory = self.gateway.list_inventory().await?;
        let sales = self.gateway.list_sales().await?;
        let expenses = self.gateway.list_expenses().await?;
        let purchase_orders = self.gateway.list_purchase_orders().await?;

        self.snapshots = Snapshots {
            inventory,
            sales,
            expenses,
            purchase_orders,
        };
        Ok(())
    }

    /// Recovery path after a failed remote commit: discard local drift by
    /// refetching everything. A refresh failure is logged, not propagated;
    /// the original write error is what the caller reports.
    pub(crate) async fn resynchronize(&mut self) {
        if let Err(err) = self.refresh_all().await {
            tracing::error!(error = %err, "resynchronization after failed commit also failed");
        }
    }

    /// Role gate for catalog, purchasing, and expense mutations.
    pub(crate) fn require_admin(session: &Session) -> AppResult<()> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }
}
