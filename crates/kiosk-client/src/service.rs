//! The basket service contract and its wire DTOs.

use crate::error::FetchError;
use async_trait::async_trait;
use kiosk_core::{BasketSnapshot, LineItem, Product, ProductId};
use kiosk_session::SessionIds;
use serde::{Deserialize, Serialize};

/// Remote catalog/basket collaborator.
///
/// `?Send` because the client runs on the browser's single UI thread and
/// mock implementations in tests use interior mutability.
#[async_trait(?Send)]
pub trait BasketService {
    /// List the store catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch the authoritative basket snapshot for a session.
    async fn fetch_items(&self, ids: &SessionIds) -> Result<BasketSnapshot, FetchError>;

    /// Add a product to the basket; the server assigns the item id and
    /// owns quantity semantics for repeated adds.
    async fn add_item(&self, ids: &SessionIds, product_id: &ProductId)
        -> Result<LineItem, FetchError>;

    /// Remove a line item from the basket.
    async fn remove_item(
        &self,
        ids: &SessionIds,
        item_id: &kiosk_core::ItemId,
    ) -> Result<(), FetchError>;
}

#[async_trait(?Send)]
impl<S: BasketService + ?Sized> BasketService for std::rc::Rc<S> {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_products().await
    }

    async fn fetch_items(&self, ids: &SessionIds) -> Result<BasketSnapshot, FetchError> {
        (**self).fetch_items(ids).await
    }

    async fn add_item(
        &self,
        ids: &SessionIds,
        product_id: &ProductId,
    ) -> Result<LineItem, FetchError> {
        (**self).add_item(ids, product_id).await
    }

    async fn remove_item(
        &self,
        ids: &SessionIds,
        item_id: &kiosk_core::ItemId,
    ) -> Result<(), FetchError> {
        (**self).remove_item(ids, item_id).await
    }
}

/// Body of `POST .../items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Response of `POST .../items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddItemResponse {
    pub item: LineItem,
}
