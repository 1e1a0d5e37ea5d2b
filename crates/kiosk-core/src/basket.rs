//! Basket line items and snapshots.

use crate::ids::{ItemId, ProductId};
use serde::{Deserialize, Serialize};

/// One product entry in a basket, with a server-assigned identifier.
///
/// `price` and `quantity` are optional on the wire; pricing treats a
/// missing price as 0 and a missing quantity as 1. Quantity semantics for
/// repeated adds of the same product are owned by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Server-assigned line item identifier.
    pub item_id: ItemId,
    /// Product identifier.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Unit price in dollars.
    #[serde(default)]
    pub price: Option<f64>,
    /// Quantity in the basket.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl LineItem {
    /// Unit price, with a missing price treated as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Quantity, with a missing quantity treated as one.
    pub fn quantity_or_one(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Format the unit price as a dollar string.
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price_or_zero())
    }
}

/// The last-fetched authoritative basket contents.
///
/// Replaced wholesale on every successful fetch, never patched in place.
/// `item_count` is meaningful only as provided by the server; the client
/// never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BasketSnapshot {
    /// Line items, in server order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Server-provided item count.
    #[serde(default)]
    pub item_count: i64,
    /// Server-provided last-updated timestamp, for display only.
    #[serde(default)]
    pub last_updated_at: String,
}

impl BasketSnapshot {
    /// Check if the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
