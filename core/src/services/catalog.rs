//! Inventory catalog management
//!
//! Plain CRUD over inventory items plus manual stock adjustments. All
//! operations are admin-gated and follow the same optimistic-apply /
//! refetch-on-failure pattern as the transactions.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::{validate_amount, validate_threshold, InventoryItem, Session};

use crate::error::{AppError, AppResult};
use crate::gateway::InventoryItemPatch;
use crate::store::RetailStore;

/// Input for adding a catalog item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItemInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub quantity: i32,
    pub cost_price: Decimal,
    pub sales_price: Decimal,
    pub low_stock_threshold: i32,
}

/// Input for editing a catalog item. Only populated fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sales_price: Option<Decimal>,
    pub low_stock_threshold: Option<i32>,
}

impl RetailStore {
    /// Add an item to the catalog. Admin only.
    pub async fn add_item(
        &mut self,
        session: &Session,
        input: NewItemInput,
    ) -> AppResult<InventoryItem> {
        Self::require_admin(session)?;
        input
            .validate()
            .map_err(|e| AppError::validation("input", e.to_string()))?;
        if input.quantity < 0 {
            return Err(AppError::validation(
                "quantity",
                "Initial stock cannot be negative",
            ));
        }
        validate_amount(input.cost_price).map_err(|m| AppError::validation("cost_price", m))?;
        validate_amount(input.sales_price).map_err(|m| AppError::validation("sales_price", m))?;
        validate_threshold(input.low_stock_threshold)
            .map_err(|m| AppError::validation("low_stock_threshold", m))?;

        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            quantity: input.quantity,
            cost_price: input.cost_price,
            sales_price: input.sales_price,
            low_stock_threshold: input.low_stock_threshold,
            last_updated: Utc::now(),
        };

        self.snapshots_mut().inventory.push(item.clone());

        if let Err(err) = self.gateway().insert_item(&item).await {
            tracing::warn!(item_id = %item.id, error = %err, "item insert failed, resynchronizing from store");
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(item_id = %item.id, name = %item.name, "item added");
        Ok(item)
    }

    /// Edit catalog fields of an existing item. Admin only.
    pub async fn update_item(
        &mut self,
        session: &Session,
        id: Uuid,
        input: UpdateItemInput,
    ) -> AppResult<InventoryItem> {
        Self::require_admin(session)?;
        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("name", "Name is required"));
            }
        }
        if let Some(cost_price) = input.cost_price {
            validate_amount(cost_price).map_err(|m| AppError::validation("cost_price", m))?;
        }
        if let Some(sales_price) = input.sales_price {
            validate_amount(sales_price).map_err(|m| AppError::validation("sales_price", m))?;
        }
        if let Some(threshold) = input.low_stock_threshold {
            validate_threshold(threshold)
                .map_err(|m| AppError::validation("low_stock_threshold", m))?;
        }

        let now = Utc::now();
        let updated = {
            let item = self
                .snapshots_mut()
                .inventory
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
            if let Some(name) = &input.name {
                item.name = name.trim().to_string();
            }
            if let Some(category) = &input.category {
                item.category = category.trim().to_string();
            }
            if let Some(cost_price) = input.cost_price {
                item.cost_price = cost_price;
            }
            if let Some(sales_price) = input.sales_price {
                item.sales_price = sales_price;
            }
            if let Some(threshold) = input.low_stock_threshold {
                item.low_stock_threshold = threshold;
            }
            item.last_updated = now;
            item.clone()
        };

        let patch = InventoryItemPatch {
            name: input.name.map(|n| n.trim().to_string()),
            category: input.category.map(|c| c.trim().to_string()),
            quantity: None,
            cost_price: input.cost_price,
            sales_price: input.sales_price,
            low_stock_threshold: input.low_stock_threshold,
            last_updated: Some(now),
        };

        if let Err(err) = self.gateway().update_item(id, &patch).await {
            tracing::warn!(item_id = %id, error = %err, "item update failed, resynchronizing from store");
            self.resynchronize().await;
            return Err(err);
        }

        Ok(updated)
    }

    /// Remove an item from the catalog. Admin only. Historical sales and
    /// orders keep their denormalized copy of the name.
    pub async fn delete_item(&mut self, session: &Session, id: Uuid) -> AppResult<()> {
        Self::require_admin(session)?;
        let snapshots = self.snapshots_mut();
        if !snapshots.inventory.iter().any(|i| i.id == id) {
            return Err(AppError::NotFound("Inventory item".to_string()));
        }
        snapshots.inventory.retain(|i| i.id != id);

        if let Err(err) = self.gateway().delete_item(id).await {
            tracing::warn!(item_id = %id, error = %err, "item delete failed, resynchronizing from store");
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(item_id = %id, "item deleted");
        Ok(())
    }

    /// Manually adjust stock by a signed delta, clamped at zero. Admin only.
    /// Returns the new quantity.
    pub async fn adjust_stock(
        &mut self,
        session: &Session,
        id: Uuid,
        delta: i32,
    ) -> AppResult<i32> {
        Self::require_admin(session)?;
        let now = Utc::now();
        let new_quantity = {
            let item = self
                .snapshots_mut()
                .inventory
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;
            // Manual decrements clamp; only checkout may take stock negative.
            let clamped = (item.quantity + delta).max(0);
            item.quantity = clamped;
            item.last_updated = now;
            clamped
        };

        if let Err(err) = self
            .gateway()
            .update_item(id, &InventoryItemPatch::quantity(new_quantity, now))
            .await
        {
            tracing::warn!(item_id = %id, error = %err, "stock adjustment failed, resynchronizing from store");
            self.resynchronize().await;
            return Err(err);
        }

        Ok(new_quantity)
    }
}
