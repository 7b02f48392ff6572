//! Insight Generator Client
//!
//! Summarizes the inventory and sales snapshots into a free-form text prompt
//! and asks a hosted text-completion API for business insights. The
//! interface stays loosely typed on purpose: markdown in a single text
//! block comes back, or a fixed fallback string when anything fails.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::{DateRange, InventoryItem, SaleRecord};

use crate::error::{AppError, AppResult};

/// Fallback returned to the operator when the completion API is down or
/// returns garbage. Never surfaced as an error.
pub const INSIGHT_UNAVAILABLE: &str =
    "Unable to generate insights right now. Please try again later.";

/// Client for the hosted text-completion API
#[derive(Clone)]
pub struct InsightClient {
    endpoint: String,
    api_key: String,
    model: String,
    http_client: Client,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

impl InsightClient {
    /// Create a new insight client
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            model,
            http_client,
        }
    }

    /// Create a client from environment variables
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("SHOPKEEPER__INSIGHTS__ENDPOINT").ok()?;
        let api_key = std::env::var("SHOPKEEPER__INSIGHTS__API_KEY").ok()?;
        let model = std::env::var("SHOPKEEPER__INSIGHTS__MODEL")
            .unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Some(Self::new(endpoint, api_key, model))
    }

    /// Generate a markdown insight block for the given snapshots. Optional
    /// date range narrows the sales summary; an optional operator question
    /// is appended verbatim.
    pub async fn generate(
        &self,
        inventory: &[InventoryItem],
        sales: &[SaleRecord],
        range: Option<DateRange>,
        question: Option<&str>,
    ) -> String {
        let prompt = build_prompt(inventory, sales, range, question);
        match self.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "insight generation failed");
                INSIGHT_UNAVAILABLE.to_string()
            }
        }
    }

    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse response: {}", e)))?;

        Ok(result.text)
    }
}

/// Build the free-form prompt from the snapshots.
fn build_prompt(
    inventory: &[InventoryItem],
    sales: &[SaleRecord],
    range: Option<DateRange>,
    question: Option<&str>,
) -> String {
    let in_range: Vec<&SaleRecord> = sales
        .iter()
        .filter(|s| match range {
            Some(r) => r.contains(s.timestamp.date_naive()),
            None => true,
        })
        .collect();

    let revenue: Decimal = in_range.iter().map(|s| s.total_amount).sum();
    let profit: Decimal = in_range.iter().map(|s| s.total_profit).sum();
    let low_stock: Vec<String> = inventory
        .iter()
        .filter(|i| i.is_low_stock())
        .map(|i| format!("- {} ({} left, threshold {})", i.name, i.quantity, i.low_stock_threshold))
        .collect();

    let mut prompt = String::from(
        "You are a retail business advisor for a small shop. \
         Analyze the data below and reply with concise insights in markdown.\n\n",
    );

    prompt.push_str(&format!(
        "Inventory: {} items, {} low on stock.\n",
        inventory.len(),
        low_stock.len()
    ));
    if !low_stock.is_empty() {
        prompt.push_str("Low stock items:\n");
        for line in &low_stock {
            prompt.push_str(line);
            prompt.push('\n');
        }
    }

    match range {
        Some(r) => prompt.push_str(&format!(
            "\nSales from {} to {}: {} transactions, revenue {}, profit {}.\n",
            r.start,
            r.end,
            in_range.len(),
            revenue,
            profit
        )),
        None => prompt.push_str(&format!(
            "\nSales (all time): {} transactions, revenue {}, profit {}.\n",
            in_range.len(),
            revenue,
            profit
        )),
    }

    if let Some(question) = question {
        prompt.push_str("\nThe owner asks: ");
        prompt.push_str(question);
        prompt.push('\n');
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn item(name: &str, quantity: i32, threshold: i32) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "misc".to_string(),
            quantity,
            cost_price: Decimal::from_str("1.00").unwrap(),
            sales_price: Decimal::from_str("2.00").unwrap(),
            low_stock_threshold: threshold,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_mentions_low_stock() {
        let inventory = vec![item("Milk", 2, 5), item("Bread", 50, 5)];
        let prompt = build_prompt(&inventory, &[], None, None);
        assert!(prompt.contains("Milk"));
        assert!(!prompt.contains("Bread ("));
        assert!(prompt.contains("2 items, 1 low on stock"));
    }

    #[test]
    fn test_prompt_appends_question() {
        let prompt = build_prompt(&[], &[], None, Some("What should I restock first?"));
        assert!(prompt.contains("What should I restock first?"));
    }

    #[test]
    fn test_prompt_filters_sales_by_range() {
        let inside = shared::SaleRecord::new(vec![], Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
        let outside = shared::SaleRecord::new(vec![], Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap());
        let range = DateRange::new(
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        );
        let prompt = build_prompt(&[], &[inside, outside], Some(range), None);
        assert!(prompt.contains("1 transactions"));
    }
}
