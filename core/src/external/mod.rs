//! Clients for external services

pub mod insights;

pub use insights::InsightClient;
