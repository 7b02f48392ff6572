//! Domain models for Shopkeeper

pub mod expenses;
pub mod inventory;
pub mod purchasing;
pub mod sales;
pub mod user;

pub use expenses::*;
pub use inventory::*;
pub use purchasing::*;
pub use sales::*;
pub use user::*;
