//! Expense logging models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged business expense. Immutable except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    /// Business date the expense applies to.
    pub date: NaiveDate,
    /// When the operator recorded it.
    pub recorded_at: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn new(description: String, amount: Decimal, category: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount,
            category,
            date,
            recorded_at: Utc::now(),
        }
    }
}
