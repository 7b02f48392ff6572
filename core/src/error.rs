//! Error handling for Shopkeeper
//!
//! One taxonomy for the whole core: validation problems stay local,
//! remote-store failures trigger reconciliation, and external-service
//! failures degrade to fallback output.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors (caught before any remote write)
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Authorization at the core's operation boundary
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Business logic errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Remote store errors (network/service failure during a write or read)
    #[error("Remote store error: {0}")]
    RemoteStore(String),

    // External service errors (insight generator)
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for core operations
pub type AppResult<T> = Result<T, AppError>;
