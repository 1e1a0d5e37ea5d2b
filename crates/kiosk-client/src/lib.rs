//! HTTP contract of the remote catalog/basket service.
//!
//! The remote service is the sole source of truth for catalog data and
//! basket contents; this crate only consumes its REST contract:
//!
//! - `GET    /api/products`
//! - `GET    /api/stores/{storeId}/baskets/{basketId}/items`
//! - `POST   /api/stores/{storeId}/baskets/{basketId}/items`
//! - `DELETE /api/stores/{storeId}/baskets/{basketId}/items/{itemId}`
//!
//! All non-2xx responses are treated uniformly as failure; there is no
//! distinct error-code handling.

mod error;
mod http;
mod service;

pub use error::FetchError;
pub use http::HttpBasketService;
pub use service::{AddItemRequest, AddItemResponse, BasketService};
