//! Key-value storage contract.

use std::cell::RefCell;
use std::collections::HashMap;

/// String key-value store scoped to the browser session.
///
/// Implementations are infallible by contract: a backend that cannot read
/// or write simply behaves as if the key were absent. That keeps callers
/// functional in degraded mode instead of surfacing storage errors to the
/// shopper.
pub trait KeyValueStore {
    /// Read a value, or `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value; silently dropped if the backend is unavailable.
    fn set(&self, key: &str, value: &str);

    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory store, used natively and as the degraded-mode fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
