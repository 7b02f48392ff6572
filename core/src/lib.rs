//! Shopkeeper retail management core
//!
//! Inventory, checkout, purchase orders, expenses, reporting, and AI-backed
//! business insights for a single-operator retail counter. The heart of the
//! crate is [`RetailStore`]: it keeps an in-memory snapshot of the four
//! entity collections, applies business transactions to that snapshot
//! optimistically, persists them through a [`gateway::StoreGateway`], and
//! reconciles by refetching authoritative state whenever a remote write
//! fails.

pub mod config;
pub mod error;
pub mod external;
pub mod gateway;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::{RetailStore, Snapshots};
