//! Session identity for the Kiosk client.
//!
//! A shopping session is identified by the `(storeId, basketId)` pair,
//! invented client-side and persisted in browser-scoped storage so it
//! survives navigation within a session. Storage is an external
//! collaborator reached through the [`KeyValueStore`] contract; when it is
//! unavailable the identity degrades to per-call defaults rather than
//! failing.

mod identity;
mod store;

pub use identity::{
    generate_basket_id, SessionIdentity, SessionIds, BASKET_ID_KEY, DEFAULT_BASKET_ID,
    DEFAULT_STORE_ID, STORE_ID_KEY,
};
pub use store::{KeyValueStore, MemoryStore};
