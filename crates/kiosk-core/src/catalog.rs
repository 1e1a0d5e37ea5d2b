//! Catalog types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the store catalog.
///
/// Read-only on the client; the catalog service owns every field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub product_id: ProductId,
    /// Display name.
    pub product_name: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Category label, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Format the price as a dollar string.
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "productId": "prod-1",
            "productName": "Sparkling Water",
            "price": 1.5,
            "category": "Drinks",
            "description": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id.as_str(), "prod-1");
        assert_eq!(product.product_name, "Sparkling Water");
        assert_eq!(product.category.as_deref(), Some("Drinks"));
        assert!(product.description.is_none());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_price_display() {
        let product = Product {
            product_id: ProductId::new("prod-1"),
            product_name: "Widget".to_string(),
            price: 19.995,
            category: None,
            description: None,
            image_url: None,
        };
        assert_eq!(product.price_display(), "$20.00");
    }
}
