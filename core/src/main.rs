//! Shopkeeper - Retail Management Core
//!
//! Loads configuration, connects to the hosted store backend, pulls the
//! initial snapshots, and prints the dashboard summary.

use std::{sync::Arc, time::Duration};

use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopkeeper_core::external::InsightClient;
use shopkeeper_core::gateway::RestGateway;
use shopkeeper_core::services::reporting;
use shopkeeper_core::{Config, RetailStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopkeeper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Shopkeeper");
    tracing::info!("Environment: {}", config.environment);

    let gateway = Arc::new(RestGateway::new(
        config.store.url.clone(),
        config.store.api_key.clone(),
        Duration::from_secs(config.store.request_timeout_secs),
    ));

    let mut store = RetailStore::new(gateway);

    tracing::info!("Fetching snapshots from store backend...");
    store.refresh_all().await?;
    tracing::info!(
        inventory = store.inventory().len(),
        sales = store.sales().len(),
        expenses = store.expenses().len(),
        purchase_orders = store.purchase_orders().len(),
        "Snapshots loaded"
    );

    let metrics = reporting::dashboard_metrics(store.snapshots());
    tracing::info!(
        revenue = %metrics.total_revenue,
        profit = %metrics.total_profit,
        net_income = %metrics.net_income,
        inventory_valuation = %metrics.inventory_valuation,
        low_stock = metrics.low_stock_count,
        "Dashboard metrics"
    );

    let today = Local::now().date_naive();
    for point in reporting::daily_sales_series(store.sales(), today) {
        tracing::info!(date = %point.date, total = %point.total, profit = %point.profit, "Daily sales");
    }

    let insights = InsightClient::new(
        config.insights.endpoint.clone(),
        config.insights.api_key.clone(),
        config.insights.model.clone(),
    );
    let summary = insights
        .generate(store.inventory(), store.sales(), None, None)
        .await;
    tracing::info!("Business insights:\n{}", summary);

    Ok(())
}
