//! `reqwest`-backed implementation of the basket service contract.

use crate::error::FetchError;
use crate::service::{AddItemRequest, AddItemResponse, BasketService};
use async_trait::async_trait;
use kiosk_core::{BasketSnapshot, ItemId, LineItem, Product, ProductId};
use kiosk_session::SessionIds;

/// HTTP client for the catalog/basket service.
pub struct HttpBasketService {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpBasketService {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBasketService {
    /// Create a client against the same-origin `/api` prefix.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "/api".to_string(),
        }
    }

    /// Override the base URL (e.g. an absolute origin in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn items_url(&self, ids: &SessionIds) -> String {
        format!(
            "{}/stores/{}/baskets/{}/items",
            self.base_url, ids.store_id, ids.basket_id
        )
    }

    fn item_url(&self, ids: &SessionIds, item_id: &ItemId) -> String {
        format!("{}/{}", self.items_url(ids), item_id)
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "basket service unreachable");
            FetchError::Connection(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "basket service returned failure");
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        response
            .json()
            .await
            .map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait(?Send)]
impl BasketService for HttpBasketService {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.products_url();
        let response = self.send(self.client.get(&url), &url).await?;
        Self::json(response).await
    }

    async fn fetch_items(&self, ids: &SessionIds) -> Result<BasketSnapshot, FetchError> {
        let url = self.items_url(ids);
        let response = self.send(self.client.get(&url), &url).await?;
        Self::json(response).await
    }

    async fn add_item(
        &self,
        ids: &SessionIds,
        product_id: &ProductId,
    ) -> Result<LineItem, FetchError> {
        let url = self.items_url(ids);
        let body = AddItemRequest {
            product_id: product_id.clone(),
        };
        let response = self.send(self.client.post(&url).json(&body), &url).await?;
        let added: AddItemResponse = Self::json(response).await?;
        Ok(added.item)
    }

    async fn remove_item(&self, ids: &SessionIds, item_id: &ItemId) -> Result<(), FetchError> {
        let url = self.item_url(ids, item_id);
        // No required response body on delete.
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }
}
