//! Application context shared by all entries of a feature.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::localization::{IdentityResolver, Resolver};
use crate::store::SettingsStore;

use super::EntryError;

/// Returns the store key holding the version of entry `key`.
#[must_use]
pub fn version_key(key: &str) -> String {
    format!("{key}_Version")
}

/// Returns the store key holding the modified flag of entry `key`.
#[must_use]
pub fn modified_key(key: &str) -> String {
    format!("{key}_Modified")
}

/// Owns what entries need from their surroundings: the store, the key
/// prefix and the display resolver.
///
/// Entries are constructed against a context, which also guarantees key
/// uniqueness: an entry is rejected if any of its three store keys is
/// already used by a registered entry.
///
/// Simulating a restart means building a fresh context (and fresh entries)
/// over the same store.
pub struct SettingsContext {
    store: Rc<dyn SettingsStore>,
    prefix: String,
    resolver: Rc<dyn Resolver>,
    registered: RefCell<Vec<String>>,
    reserved: RefCell<BTreeSet<String>>,
}

impl SettingsContext {
    /// Creates a context over `store`, deriving keys as `{prefix}_{localKey}`.
    ///
    /// An empty prefix uses local keys unchanged.
    pub fn new(store: Rc<dyn SettingsStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            resolver: Rc::new(IdentityResolver),
            registered: RefCell::new(Vec::new()),
            reserved: RefCell::new(BTreeSet::new()),
        }
    }

    /// Replaces the display resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Rc<dyn Resolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Returns the shared store.
    #[must_use]
    pub const fn store(&self) -> &Rc<dyn SettingsStore> {
        &self.store
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the display resolver.
    #[must_use]
    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    /// Derives the full key for `local_key`.
    #[must_use]
    pub fn key_for(&self, local_key: &str) -> String {
        if self.prefix.is_empty() {
            local_key.to_string()
        } else {
            format!("{}_{local_key}", self.prefix)
        }
    }

    /// Returns the full keys of all registered entries, in registration order.
    #[must_use]
    pub fn registered_keys(&self) -> Vec<String> {
        self.registered.borrow().clone()
    }

    /// Claims the three store keys of a new entry.
    pub(super) fn register(&self, local_key: &str) -> Result<String, EntryError> {
        if local_key.trim().is_empty() {
            return Err(EntryError::EmptyKey);
        }

        let key = self.key_for(local_key);
        let derived = [key.clone(), version_key(&key), modified_key(&key)];

        let mut reserved = self.reserved.borrow_mut();
        if derived.iter().any(|k| reserved.contains(k)) {
            return Err(EntryError::DuplicateKey { key });
        }
        reserved.extend(derived);
        self.registered.borrow_mut().push(key.clone());

        Ok(key)
    }
}

impl fmt::Debug for SettingsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsContext")
            .field("prefix", &self.prefix)
            .field("registered", &self.registered.borrow())
            .finish_non_exhaustive()
    }
}
