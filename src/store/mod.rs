//! Persistent key-value storage backing settings entries.
//!
//! This module provides the store contract consumed by
//! [`SettingsEntry`](crate::entry::SettingsEntry) and two implementations:
//! - [`MemoryStore`] - an in-process map, handy for tests and ephemeral hosts
//! - [`FileStore`] - a JSON document on disk with atomic rewrites
//!
//! Reads never fail. A missing key is [`LoadResult::NotFound`] and unreadable
//! or mistyped data is [`LoadResult::Corrupted`], so callers can fall back to
//! defaults without any error plumbing.

mod file;
mod memory;
mod value;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use value::{Persist, StoreValue};

use std::io;

use thiserror::Error;

/// Result of loading a single key from persistent storage.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - The key holds a readable value
/// - The key does not exist
/// - The key exists but its data cannot be used
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<T = StoreValue> {
    /// Successfully loaded the stored value.
    Loaded(T),

    /// No value is stored under the key.
    NotFound,

    /// A value exists but is malformed or of the wrong type.
    /// Callers should continue with their fallback and overwrite on next save.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl<T> LoadResult<T> {
    /// Returns the loaded value, or `fallback` for `NotFound`/`Corrupted`.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Loaded(value) => value,
            Self::NotFound | Self::Corrupted { .. } => fallback,
        }
    }

    /// Returns `true` if a value was successfully loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl LoadResult<StoreValue> {
    /// Converts a raw stored value into a typed one.
    ///
    /// A value of the wrong type becomes [`LoadResult::Corrupted`].
    #[must_use]
    pub fn decode<T: Persist>(self) -> LoadResult<T> {
        match self {
            Self::Loaded(raw) => T::from_store(&raw).map_or_else(
                || LoadResult::Corrupted {
                    reason: format!("expected {}, found {} `{raw}`", T::KIND, raw.kind()),
                },
                LoadResult::Loaded,
            ),
            Self::NotFound => LoadResult::NotFound,
            Self::Corrupted { reason } => LoadResult::Corrupted { reason },
        }
    }
}

/// Errors that can occur while persisting a value.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants to allow graceful degradation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to write the backing file.
    #[error("Failed to write settings file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the store contents.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The backend refused the value.
    #[error("Store rejected key '{key}': {reason}")]
    Rejected {
        /// Key that could not be written
        key: String,
        /// Reason reported by the backend
        reason: String,
    },
}

/// Abstraction over the key-value backend that settings entries persist into.
///
/// Implementations should:
/// - Return `LoadResult::NotFound` for keys that were never written
/// - Degrade gracefully on read errors (return `LoadResult::Corrupted`)
/// - Make each individual `save` durable before returning
///
/// Entries write a logical record as three separate keys (`K`, `K_Version`,
/// `K_Modified`). Nothing here makes those three writes atomic as a group; a
/// failure between them can leave the record inconsistent.
///
/// Stores are used from a single thread and take `&self`; implementations use
/// interior mutability for writes.
pub trait SettingsStore {
    /// Loads the value stored under `key`.
    fn load(&self, key: &str) -> LoadResult;

    /// Saves `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn save(&self, key: &str, value: StoreValue) -> Result<(), StoreError>;
}

/// Loads a typed value, falling back when it is absent or malformed.
///
/// Malformed data is logged and otherwise treated exactly like a missing key.
pub fn load_or<T: Persist>(store: &dyn SettingsStore, key: &str, fallback: T) -> T {
    match store.load(key).decode::<T>() {
        LoadResult::Loaded(value) => value,
        LoadResult::NotFound => fallback,
        LoadResult::Corrupted { reason } => {
            tracing::warn!(key, "Ignoring malformed settings value ({reason})");
            fallback
        }
    }
}
