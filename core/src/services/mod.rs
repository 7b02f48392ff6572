//! Business operations on the retail store

pub mod catalog;
pub mod checkout;
pub mod expenses;
pub mod purchasing;
pub mod reporting;

pub use catalog::{NewItemInput, UpdateItemInput};
pub use checkout::SaleLine;
pub use expenses::NewExpenseInput;
pub use purchasing::{CreatePurchaseOrderInput, OrderLine};
pub use reporting::{DailySalesPoint, DashboardMetrics};
