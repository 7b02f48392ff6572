//! Purchase orders
//!
//! Ordering stock has no inventory effect; receiving it does. The status
//! field is a one-way machine (ordered -> received xor cancelled), and the
//! restock on receipt is guarded by the previous status read at call time so
//! a repeated "received" update never double-counts stock.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::{
    validate_amount, validate_quantity, validate_required_text, PurchaseOrder, PurchaseOrderItem,
    PurchaseOrderStatus, Session,
};

use crate::error::{AppError, AppResult};
use crate::gateway::InventoryItemPatch;
use crate::store::RetailStore;

/// One line of a new purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

/// Input for creating a purchase order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePurchaseOrderInput {
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
    #[validate(length(min = 1, message = "An order needs at least one line"))]
    pub items: Vec<OrderLine>,
    pub notes: Option<String>,
}

impl RetailStore {
    /// Create a purchase order in `ordered` status. Admin only. Stock is not
    /// touched until the order is received.
    pub async fn create_purchase_order(
        &mut self,
        session: &Session,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        Self::require_admin(session)?;
        input
            .validate()
            .map_err(|e| AppError::validation("input", e.to_string()))?;
        validate_required_text(&input.supplier)
            .map_err(|m| AppError::validation("supplier", m))?;
        for line in &input.items {
            validate_quantity(line.quantity)
                .map_err(|m| AppError::validation("quantity", m))?;
            validate_amount(line.unit_cost)
                .map_err(|m| AppError::validation("unit_cost", m))?;
        }

        let items: Vec<PurchaseOrderItem> = input
            .items
            .iter()
            .map(|line| PurchaseOrderItem {
                item_id: line.item_id,
                name: self
                    .inventory()
                    .iter()
                    .find(|i| i.id == line.item_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default(),
                quantity: line.quantity,
                unit_cost: line.unit_cost,
            })
            .collect();
        let order = PurchaseOrder::new(input.supplier.trim().to_string(), items, input.notes);

        self.snapshots_mut().purchase_orders.insert(0, order.clone());

        if let Err(err) = self.gateway().insert_purchase_order(&order).await {
            tracing::warn!(
                order_id = %order.id,
                error = %err,
                "purchase order commit failed, resynchronizing from store"
            );
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(
            operator = %session.name,
            order_id = %order.id,
            supplier = %order.supplier,
            total_cost = %order.total_cost,
            "purchase order created"
        );
        Ok(order)
    }

    /// Move a purchase order to `received` or `cancelled`. Admin only.
    ///
    /// Unknown ids are silently ignored. The status field itself is written
    /// unconditionally, even over a terminal state; only the inventory
    /// restock checks the previous status, so receiving an already-received
    /// order changes nothing in stock. Receiving restocks every order line
    /// whose item still exists in the current snapshot, one remote write per
    /// item, sequentially.
    pub async fn update_purchase_order_status(
        &mut self,
        session: &Session,
        id: Uuid,
        new_status: PurchaseOrderStatus,
    ) -> AppResult<()> {
        Self::require_admin(session)?;
        if new_status == PurchaseOrderStatus::Ordered {
            return Err(AppError::InvalidStateTransition(
                "an order cannot go back to ordered".to_string(),
            ));
        }

        let now = Utc::now();
        let (previous, order_items) =
            match self.snapshots_mut().purchase_orders.iter_mut().find(|o| o.id == id) {
                Some(order) => {
                    let previous = order.status;
                    order.status = new_status;
                    (previous, order.items.clone())
                }
                None => {
                    tracing::debug!(order_id = %id, "status update for unknown purchase order ignored");
                    return Ok(());
                }
            };

        if previous.is_terminal() {
            tracing::warn!(
                order_id = %id,
                previous = previous.as_str(),
                status = new_status.as_str(),
                "overwriting terminal purchase order status"
            );
        }

        let mut staged: Vec<(Uuid, i32)> = Vec::new();
        if new_status == PurchaseOrderStatus::Received && previous != PurchaseOrderStatus::Received
        {
            let snapshots = self.snapshots_mut();
            for line in &order_items {
                // A line whose item was deleted since ordering restocks nothing.
                if let Some(item) = snapshots.inventory.iter_mut().find(|i| i.id == line.item_id) {
                    item.quantity += line.quantity;
                    item.last_updated = now;
                    staged.push((item.id, item.quantity));
                }
            }
        }

        if let Err(err) = self.commit_status_update(id, new_status, &staged, now).await {
            tracing::warn!(
                order_id = %id,
                error = %err,
                "status commit failed, resynchronizing from store"
            );
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(
            operator = %session.name,
            order_id = %id,
            status = new_status.as_str(),
            restocked_items = staged.len(),
            "purchase order status updated"
        );
        Ok(())
    }

    async fn commit_status_update(
        &self,
        id: Uuid,
        status: PurchaseOrderStatus,
        staged: &[(Uuid, i32)],
        now: chrono::DateTime<Utc>,
    ) -> AppResult<()> {
        self.gateway().update_purchase_order_status(id, status).await?;
        for (item_id, quantity) in staged {
            self.gateway()
                .update_item(*item_id, &InventoryItemPatch::quantity(*quantity, now))
                .await?;
        }
        Ok(())
    }
}
