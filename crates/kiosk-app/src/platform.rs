//! Browser integration points: session storage and the payment stub.

use kiosk_core::PricingBreakdown;
use kiosk_flow::{PaymentError, PaymentGateway};
use std::time::Duration;

/// Fixed latency of the simulated payment authorization.
pub const PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// `localStorage`-backed session store.
///
/// Storage failures (disabled storage, private browsing quotas) degrade
/// to key absence, which the identity layer resolves with defaults.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl kiosk_session::KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            let _ = storage.remove_item(key);
        }
    }
}

/// The session store for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn session_store() -> BrowserStore {
    BrowserStore
}

/// The session store for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn session_store() -> kiosk_session::MemoryStore {
    kiosk_session::MemoryStore::new()
}

/// Always-approving payment gateway with a fixed authorization delay.
///
/// Stands in for a real processor; the checkout flow still exercises its
/// full processing phase against it.
pub struct SimulatedGateway;

#[async_trait::async_trait(?Send)]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(&self, breakdown: &PricingBreakdown) -> Result<(), PaymentError> {
        tracing::debug!(total = breakdown.total, "simulated payment authorization");
        delay(PAYMENT_DELAY).await;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
async fn delay(duration: Duration) {
    let (sender, receiver) = futures::channel::oneshot::channel::<()>();
    leptos::prelude::set_timeout(
        move || {
            let _ = sender.send(());
        },
        duration,
    );
    let _ = receiver.await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn delay(_duration: Duration) {}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use kiosk_session::{KeyValueStore, SessionIdentity, DEFAULT_STORE_ID};

    #[test]
    fn test_simulated_gateway_approves() {
        let breakdown = PricingBreakdown::default();
        let result = block_on(SimulatedGateway.authorize(&breakdown));
        assert!(result.is_ok());
    }

    #[test]
    fn test_native_store_resolves_defaults() {
        let store = session_store();
        store.set("probe", "1");
        assert_eq!(store.get("probe").as_deref(), Some("1"));

        let ids = SessionIdentity::new(session_store()).resolve();
        assert_eq!(ids.store_id.as_str(), DEFAULT_STORE_ID);
    }
}
