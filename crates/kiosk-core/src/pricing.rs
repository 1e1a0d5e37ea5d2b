//! Pricing derivation for a basket snapshot.
//!
//! The breakdown is a pure function of the line items: recomputed on every
//! render, never cached or persisted. Full-precision values are carried
//! throughout; rounding to two decimals happens only in the `_display`
//! accessors, independently per figure.

use crate::basket::LineItem;
use serde::{Deserialize, Serialize};

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: f64 = 0.0825;

/// Derived subtotal/tax/total for a set of line items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PricingBreakdown {
    /// Sum of `price * quantity` over all items.
    pub subtotal: f64,
    /// `subtotal * TAX_RATE`, full precision.
    pub tax: f64,
    /// `subtotal + tax`, full precision.
    pub total: f64,
}

impl PricingBreakdown {
    /// Compute the breakdown for a sequence of line items.
    ///
    /// A missing price counts as 0 and a missing quantity as 1, so a
    /// partially-populated server response never fails here.
    pub fn for_items(items: &[LineItem]) -> Self {
        let subtotal: f64 = items
            .iter()
            .map(|item| item.price_or_zero() * item.quantity_or_one() as f64)
            .sum();
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Subtotal as a dollar string.
    pub fn subtotal_display(&self) -> String {
        format!("${:.2}", self.subtotal)
    }

    /// Tax as a dollar string.
    pub fn tax_display(&self) -> String {
        format!("${:.2}", self.tax)
    }

    /// Total as a dollar string.
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ItemId, ProductId};

    fn item(id: &str, price: Option<f64>, quantity: Option<i64>) -> LineItem {
        LineItem {
            item_id: ItemId::new(id),
            product_id: ProductId::new(format!("prod-{id}")),
            product_name: format!("Product {id}"),
            price,
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn test_empty_basket_is_all_zero() {
        let pricing = PricingBreakdown::for_items(&[]);
        assert_eq!(pricing.subtotal, 0.0);
        assert_eq!(pricing.tax, 0.0);
        assert_eq!(pricing.total, 0.0);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        let items = vec![
            item("1", Some(1.5), Some(3)),
            item("2", Some(19.99), Some(2)),
            item("3", Some(0.35), Some(1)),
        ];
        let pricing = PricingBreakdown::for_items(&items);

        let subtotal = 1.5 * 3.0 + 19.99 * 2.0 + 0.35;
        assert!((pricing.subtotal - subtotal).abs() < 1e-9);
        assert!((pricing.tax - subtotal * TAX_RATE).abs() < 1e-9);
        assert!((pricing.total - (pricing.subtotal + pricing.tax)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_price_counts_as_zero_and_missing_quantity_as_one() {
        let items = vec![item("1", None, Some(2)), item("2", Some(10.0), None)];
        let pricing = PricingBreakdown::for_items(&items);
        assert!((pricing.subtotal - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_rounds_each_figure_independently() {
        // 19.99 * 2 = 39.98; tax = 3.29835; total = 43.27835 -> $43.28
        let items = vec![item("1", Some(19.99), Some(2))];
        let pricing = PricingBreakdown::for_items(&items);
        assert_eq!(pricing.subtotal_display(), "$39.98");
        assert_eq!(pricing.tax_display(), "$3.30");
        assert_eq!(pricing.total_display(), "$43.28");
    }
}
