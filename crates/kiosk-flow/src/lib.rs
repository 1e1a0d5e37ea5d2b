//! Basket and checkout session state machines.
//!
//! [`BasketSession`] orchestrates fetching, mutating and pricing the
//! active basket against the remote service; [`CheckoutFlow`] layers the
//! payment sub-machine and post-completion session rotation on top of it.
//!
//! Both run on the browser's single-threaded event loop: remote calls
//! suspend only their own future, and independent mutations may be in
//! flight concurrently. When two fetches race, the last response to
//! settle wins the snapshot; the remote service stays the sole source of
//! truth and no financial commitment happens before the payment phase, so
//! display staleness is accepted rather than guarded against.

mod checkout;
mod session;
mod state;

#[cfg(test)]
mod mock;

pub use checkout::{
    CheckoutFlow, CheckoutPhase, PaymentError, PaymentGateway, Receipt, PAYMENT_FAILED,
};
pub use session::{
    BasketSession, CatalogSession, ADD_FAILED, BASKET_LOAD_FAILED, PRODUCTS_LOAD_FAILED,
    REMOVE_FAILED, REMOVE_SUCCEEDED,
};
pub use state::LoadState;
