//! Shared types and models for Shopkeeper
//!
//! This crate contains the domain vocabulary shared between the
//! reconciliation core and any frontend that renders it.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
