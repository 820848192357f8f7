use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Process-local durable key/value storage.
///
/// Contract (kept deliberately weak, matching browser `localStorage`):
/// - a missing key is an absence, not an error;
/// - no atomicity across keys;
/// - no read-your-writes guarantee across separate execution contexts;
/// - synchronous within one context.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&self, key: &str, value: Vec<u8>);
}

/// In-memory [`DurableStore`] backed by a shared map.
///
/// Clones share the underlying map: two clones model two browser tabs over a
/// single `localStorage`, each with its own engine and broadcaster but a
/// common persistence layer. Last write wins per key.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Vec<u8>) {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_owned(), value);
    }
}
