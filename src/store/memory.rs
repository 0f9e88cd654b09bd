//! In-memory store implementation.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{LoadResult, SettingsStore, StoreError, StoreValue};

/// Settings store that keeps every value in process memory.
///
/// Nothing survives the process, but a single instance shared between
/// entry generations (see [`SettingsContext`](crate::entry::SettingsContext))
/// behaves exactly like a persistent backend across simulated restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, StoreValue>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given values.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<StoreValue>,
    {
        Self {
            values: RefCell::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Writes a value directly, as an external editor of the store would.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<StoreValue>) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    /// Removes a key, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<StoreValue> {
        self.values.borrow_mut().remove(key)
    }

    /// Returns a copy of the value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoreValue> {
        self.values.borrow().get(key).cloned()
    }

    /// Returns all keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> LoadResult {
        self.values
            .borrow()
            .get(key)
            .cloned()
            .map_or(LoadResult::NotFound, LoadResult::Loaded)
    }

    fn save(&self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
