//! Expense logging
//!
//! Expenses are immutable once recorded; the only mutation is deletion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::{validate_amount, ExpenseRecord, Session};

use crate::error::{AppError, AppResult};
use crate::store::RetailStore;

/// Input for logging an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewExpenseInput {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub amount: Decimal,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub date: NaiveDate,
}

impl RetailStore {
    /// Log an expense. Admin only.
    pub async fn add_expense(
        &mut self,
        session: &Session,
        input: NewExpenseInput,
    ) -> AppResult<ExpenseRecord> {
        Self::require_admin(session)?;
        input
            .validate()
            .map_err(|e| AppError::validation("input", e.to_string()))?;
        validate_amount(input.amount).map_err(|m| AppError::validation("amount", m))?;

        let expense = ExpenseRecord::new(
            input.description.trim().to_string(),
            input.amount,
            input.category.trim().to_string(),
            input.date,
        );

        self.snapshots_mut().expenses.insert(0, expense.clone());

        if let Err(err) = self.gateway().insert_expense(&expense).await {
            tracing::warn!(
                expense_id = %expense.id,
                error = %err,
                "expense commit failed, resynchronizing from store"
            );
            self.resynchronize().await;
            return Err(err);
        }

        tracing::debug!(expense_id = %expense.id, amount = %expense.amount, "expense recorded");
        Ok(expense)
    }

    /// Delete an expense. Admin only.
    pub async fn delete_expense(&mut self, session: &Session, id: Uuid) -> AppResult<()> {
        Self::require_admin(session)?;
        let snapshots = self.snapshots_mut();
        if !snapshots.expenses.iter().any(|e| e.id == id) {
            return Err(AppError::NotFound("Expense".to_string()));
        }
        snapshots.expenses.retain(|e| e.id != id);

        if let Err(err) = self.gateway().delete_expense(id).await {
            tracing::warn!(expense_id = %id, error = %err, "expense delete failed, resynchronizing from store");
            self.resynchronize().await;
            return Err(err);
        }

        Ok(())
    }
}
