//! Resolution and rotation of the `(storeId, basketId)` pair.

use crate::store::KeyValueStore;
use kiosk_core::{BasketId, StoreId};

/// Storage key for the store identifier.
pub const STORE_ID_KEY: &str = "storeId";
/// Storage key for the basket identifier.
pub const BASKET_ID_KEY: &str = "basketId";

/// Default store used when storage holds no identifier.
pub const DEFAULT_STORE_ID: &str = "store-001";
/// Default basket used when storage holds no identifier.
pub const DEFAULT_BASKET_ID: &str = "basket-123";

/// The identifiers of the current shopping session.
///
/// Both fields are non-empty and stable for the life of a session; the
/// basket id changes only through [`SessionIdentity::rotate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIds {
    pub store_id: StoreId,
    pub basket_id: BasketId,
}

/// Resolves and persists the session identifiers.
///
/// Reified as an explicit collaborator rather than ambient storage reads,
/// so rotate-on-checkout and default fallback are independently testable.
pub struct SessionIdentity<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> SessionIdentity<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Read the persisted pair, substituting and writing back the fixed
    /// defaults for anything absent. Idempotent: consecutive calls with no
    /// intervening `rotate` return identical identifiers.
    pub fn resolve(&self) -> SessionIds {
        let store_id = self.read_or_default(STORE_ID_KEY, DEFAULT_STORE_ID);
        let basket_id = self.read_or_default(BASKET_ID_KEY, DEFAULT_BASKET_ID);
        SessionIds {
            store_id: StoreId::new(store_id),
            basket_id: BasketId::new(basket_id),
        }
    }

    /// Discard the persisted basket id and persist a freshly generated
    /// one, starting a new shopping session. The store id is untouched.
    pub fn rotate(&self) -> BasketId {
        self.store.remove(BASKET_ID_KEY);
        let basket_id = generate_basket_id();
        self.store.set(BASKET_ID_KEY, basket_id.as_str());
        basket_id
    }

    fn read_or_default(&self, key: &str, default: &str) -> String {
        match self.store.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.store.set(key, default);
                default.to_string()
            }
        }
    }
}

/// Generate a collision-resistant basket identifier.
pub fn generate_basket_id() -> BasketId {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 6] = rand::thread_rng().gen();
    BasketId::new(format!("basket-{}", URL_SAFE_NO_PAD.encode(bytes)))
}
