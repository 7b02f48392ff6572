//! Point-of-sale checkout
//!
//! Completing a sale is the busiest inventory-affecting transaction: it
//! creates an immutable sale record and decrements every referenced item.
//! Checkout is deliberately never blocked by insufficient stock; the counter
//! keeps moving and quantities go negative until the next restock.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::{validate_amount, validate_quantity, SaleItem, SaleRecord, Session};

use crate::error::{AppError, AppResult};
use crate::gateway::InventoryItemPatch;
use crate::store::RetailStore;

/// One line scanned at the counter. Prices are captured at sale time so the
/// receipt is immune to later catalog edits.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub price_at_sale: Decimal,
    pub cost_at_sale: Decimal,
}

impl RetailStore {
    /// Complete a sale. Open to both roles: cashiers exist to run checkout.
    ///
    /// Two-phase apply: the sale is prepended and quantities decremented
    /// locally first, then the record and one absolute quantity per distinct
    /// item are written remotely in sequence. Quantities on the wire come
    /// from the snapshot captured before the local decrement. A line whose
    /// item no longer exists is a silent no-op on both sides.
    pub async fn complete_sale(
        &mut self,
        session: &Session,
        lines: Vec<SaleLine>,
    ) -> AppResult<SaleRecord> {
        if lines.is_empty() {
            return Err(AppError::validation("items", "A sale needs at least one line"));
        }
        for line in &lines {
            validate_quantity(line.quantity)
                .map_err(|m| AppError::validation("quantity", m))?;
            validate_amount(line.price_at_sale)
                .map_err(|m| AppError::validation("price_at_sale", m))?;
            validate_amount(line.cost_at_sale)
                .map_err(|m| AppError::validation("cost_at_sale", m))?;
        }

        // Denormalize item names so the receipt survives catalog deletions.
        let items: Vec<SaleItem> = lines
            .iter()
            .map(|line| SaleItem {
                item_id: line.item_id,
                name: self
                    .inventory()
                    .iter()
                    .find(|i| i.id == line.item_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default(),
                quantity: line.quantity,
                price_at_sale: line.price_at_sale,
                cost_at_sale: line.cost_at_sale,
            })
            .collect();
        let sale = SaleRecord::new(items, Utc::now());

        // Summed quantity per distinct item id, in first-occurrence order.
        // A sale may list the same item on several lines.
        let mut sold: Vec<(Uuid, i32)> = Vec::new();
        for item in &sale.items {
            match sold.iter_mut().find(|(id, _)| *id == item.item_id) {
                Some((_, qty)) => *qty += item.quantity,
                None => sold.push((item.item_id, item.quantity)),
            }
        }

        // Absolute quantities for the remote commit, computed from the
        // pre-transaction snapshot rather than the decremented local value.
        let staged: Vec<(Uuid, i32)> = sold
            .iter()
            .filter_map(|(id, qty)| {
                self.inventory()
                    .iter()
                    .find(|i| i.id == *id)
                    .map(|i| (*id, i.quantity - qty))
            })
            .collect();

        // Phase 1: stage the local delta.
        let now = sale.timestamp;
        let snapshots = self.snapshots_mut();
        snapshots.sales.insert(0, sale.clone());
        for (id, qty) in &sold {
            if let Some(item) = snapshots.inventory.iter_mut().find(|i| i.id == *id) {
                item.quantity -= qty;
                item.last_updated = now;
            }
        }

        // Phase 2: sequential remote commit; the first failure aborts the
        // rest, and recovery is a wholesale refetch.
        if let Err(err) = self.commit_sale(&sale, &staged).await {
            tracing::warn!(
                sale_id = %sale.id,
                error = %err,
                "sale commit failed, resynchronizing from store"
            );
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(
            operator = %session.name,
            sale_id = %sale.id,
            total = %sale.total_amount,
            "sale completed"
        );
        Ok(sale)
    }

    async fn commit_sale(&self, sale: &SaleRecord, staged: &[(Uuid, i32)]) -> AppResult<()> {
        self.gateway().insert_sale(sale).await?;
        for (id, quantity) in staged {
            self.gateway()
                .update_item(*id, &InventoryItemPatch::quantity(*quantity, sale.timestamp))
                .await?;
        }
        Ok(())
    }
}
