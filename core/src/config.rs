//! Configuration management for Shopkeeper
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SHOPKEEPER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Hosted store backend configuration
    pub store: StoreConfig,

    /// Insight generator configuration
    pub insights: InsightsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store backend
    pub url: String,

    /// API key sent with every store request
    pub api_key: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightsConfig {
    /// Text-completion API endpoint
    pub endpoint: String,

    /// Text-completion API key
    pub api_key: String,

    /// Model identifier passed to the completion API
    pub model: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SHOPKEEPER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("store.request_timeout_secs", 30)?
            .set_default("insights.model", "gpt-4o-mini")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SHOPKEEPER_ prefix)
            .add_source(
                Environment::with_prefix("SHOPKEEPER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
