//! REST gateway for the hosted store backend
//!
//! Talks PostgREST conventions: one route per collection, `?id=eq.<uuid>`
//! filters for row-targeted writes, `Prefer: return=minimal` on mutations.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use shared::{ExpenseRecord, InventoryItem, PurchaseOrder, PurchaseOrderStatus, SaleRecord};

use crate::error::{AppError, AppResult};
use crate::gateway::{InventoryItemPatch, StoreGateway};

/// Client for the hosted store's REST interface
#[derive(Clone)]
pub struct RestGateway {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl RestGateway {
    /// Create a new gateway against the given base URL.
    pub fn new(base_url: String, api_key: String, request_timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn list<T: DeserializeOwned>(&self, collection: &str, order: &str) -> AppResult<Vec<T>> {
        let response = self
            .authorized(self.http_client.get(self.collection_url(collection)))
            .query(&[("select", "*"), ("order", order)])
            .send()
            .await
            .map_err(|e| AppError::RemoteStore(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RemoteStore(format!(
                "Store returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteStore(format!("Failed to parse response: {}", e)))
    }

    async fn insert<T: Serialize + Sync>(&self, collection: &str, record: &T) -> AppResult<()> {
        let request = self
            .authorized(self.http_client.post(self.collection_url(collection)))
            .header("Prefer", "return=minimal")
            .json(record);
        self.execute(request).await
    }

    async fn patch_by_id<T: Serialize + Sync>(
        &self,
        collection: &str,
        id: Uuid,
        patch: &T,
    ) -> AppResult<()> {
        let request = self
            .authorized(self.http_client.patch(self.collection_url(collection)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(patch);
        self.execute(request).await
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> AppResult<()> {
        let request = self
            .authorized(self.http_client.delete(self.collection_url(collection)))
            .query(&[("id", format!("eq.{}", id))]);
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> AppResult<()> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::RemoteStore(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::RemoteStore(format!(
                "Store returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl StoreGateway for RestGateway {
    async fn list_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        self.list("inventory", "name.asc").await
    }

    async fn list_sales(&self) -> AppResult<Vec<SaleRecord>> {
        self.list("sales", "timestamp.desc").await
    }

    async fn list_expenses(&self) -> AppResult<Vec<ExpenseRecord>> {
        self.list("expenses", "date.desc").await
    }

    async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrder>> {
        self.list("purchase_orders", "date.desc").await
    }

    async fn insert_item(&self, item: &InventoryItem) -> AppResult<()> {
        self.insert("inventory", item).await
    }

    async fn update_item(&self, id: Uuid, patch: &InventoryItemPatch) -> AppResult<()> {
        self.patch_by_id("inventory", id, patch).await
    }

    async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id("inventory", id).await
    }

    async fn insert_sale(&self, sale: &SaleRecord) -> AppResult<()> {
        self.insert("sales", sale).await
    }

    async fn insert_expense(&self, expense: &ExpenseRecord) -> AppResult<()> {
        self.insert("expenses", expense).await
    }

    async fn delete_expense(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id("expenses", id).await
    }

    async fn insert_purchase_order(&self, order: &PurchaseOrder) -> AppResult<()> {
        self.insert("purchase_orders", order).await
    }

    async fn update_purchase_order_status(
        &self,
        id: Uuid,
        status: PurchaseOrderStatus,
    ) -> AppResult<()> {
        self.patch_by_id("purchase_orders", id, &json!({ "status": status }))
            .await
    }
}
