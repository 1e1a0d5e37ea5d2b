//! Domain types and pure logic for the Kiosk storefront client.
//!
//! This crate holds everything that is computable without I/O:
//!
//! - **Catalog**: products as served by the store catalog API
//! - **Basket**: line items and wholesale-replaced basket snapshots
//! - **Pricing**: subtotal/tax/total derivation for a snapshot
//! - **Notify**: the single-slot transient notification channel
//! - **Checkout**: local payment form validation
//!
//! The async orchestration that drives these types against the remote
//! basket service lives in `kiosk-flow`.

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod ids;
pub mod notify;
pub mod pricing;

pub use basket::{BasketSnapshot, LineItem};
pub use catalog::Product;
pub use checkout::{PaymentField, PaymentForm, ValidationErrors};
pub use ids::{BasketId, ItemId, ProductId, StoreId};
pub use notify::{Notice, NoticeKind, NoticeToken, NotificationChannel, NOTICE_TTL};
pub use pricing::{PricingBreakdown, TAX_RATE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::basket::{BasketSnapshot, LineItem};
    pub use crate::catalog::Product;
    pub use crate::checkout::{PaymentField, PaymentForm, ValidationErrors};
    pub use crate::ids::{BasketId, ItemId, ProductId, StoreId};
    pub use crate::notify::{Notice, NoticeKind, NoticeToken, NotificationChannel, NOTICE_TTL};
    pub use crate::pricing::{PricingBreakdown, TAX_RATE};
}
