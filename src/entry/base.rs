//! The generic entry core: lazy load, migration, validation and notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::localization::Resolver;
use crate::store::{LoadResult, Persist, SettingsStore, StoreValue, load_or};

use super::context::{modified_key, version_key};
use super::observer::Observers;
use super::{EntryError, EntryInfo, EntryRules, SettingsContext, SubscriptionId, Unconstrained};

/// Result of [`SettingsEntry::set`].
///
/// Purely informational: an unchanged or rejected value is a silent no-op,
/// never an error, and fires no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value was cached, persisted and broadcast.
    Changed,
    /// The value equals the current one.
    Unchanged,
    /// The entry's rules refused the value.
    Rejected,
}

impl SetOutcome {
    /// Returns `true` for [`SetOutcome::Changed`].
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Debug)]
struct EntryState<T> {
    cached: Option<T>,
    modified: bool,
}

/// One named, persisted, typed setting.
///
/// The value is loaded lazily on the first [`get`](Self::get) and cached
/// afterwards. Writes go through the variant's [`EntryRules`] before being
/// cached, persisted and broadcast to subscribers.
///
/// No operation returns an error: store failures are logged and the entry
/// degrades to its default. Only construction can fail (see [`EntryError`]).
///
/// # Notifications
///
/// Handlers run synchronously on the calling thread, in subscription order,
/// after the new value is cached and persisted. A handler that changes the
/// same entry re-enters it; nothing guards against unbounded recursion, so
/// that is the handler's responsibility.
pub struct SettingsEntry<T, R = Unconstrained> {
    key: String,
    version_key: String,
    modified_key: String,
    info: EntryInfo,
    default: T,
    rules: R,
    store: Rc<dyn SettingsStore>,
    state: RefCell<EntryState<T>>,
    observers: Observers<T>,
}

impl<T, R> SettingsEntry<T, R>
where
    T: Persist + Clone + PartialEq + fmt::Debug,
    R: EntryRules<T>,
{
    /// Creates an entry with an explicit rule set.
    ///
    /// Variant aliases ([`BoolEntry`](super::BoolEntry),
    /// [`FloatEntry`](super::FloatEntry), ...) wrap this with their own
    /// constructor checks.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The local key is empty or collides with a registered entry
    /// - The version is 0
    /// - `default` fails `rules.validate`
    pub fn with_rules(
        context: &SettingsContext,
        info: EntryInfo,
        default: T,
        rules: R,
    ) -> Result<Self, EntryError> {
        if info.version() == 0 {
            return Err(EntryError::InvalidVersion {
                key: info.local_key().to_string(),
            });
        }

        if !rules.validate(&default) {
            return Err(EntryError::InvalidDefault {
                key: info.local_key().to_string(),
                value: format!("{default:?}"),
            });
        }

        let key = context.register(info.local_key())?;

        Ok(Self {
            version_key: version_key(&key),
            modified_key: modified_key(&key),
            key,
            info,
            default,
            rules,
            store: Rc::clone(context.store()),
            state: RefCell::new(EntryState {
                cached: None,
                modified: false,
            }),
            observers: Observers::default(),
        })
    }

    /// Returns the current value, loading it on first use.
    pub fn get(&self) -> T {
        let cached = self.state.borrow().cached.clone();
        cached.unwrap_or_else(|| self.initialize())
    }

    /// Replaces the value if it differs from the current one and is valid.
    ///
    /// On change the entry is marked as modified by the user, all three
    /// store keys are written and subscribers receive `(old, new)`.
    pub fn set(&self, value: T) -> SetOutcome {
        let current = self.get();
        if value == current {
            return SetOutcome::Unchanged;
        }

        if !self.rules.validate(&value) {
            tracing::debug!(key = %self.key, "Ignoring invalid value {value:?}");
            return SetOutcome::Rejected;
        }

        self.cache(value.clone(), true);
        self.persist_record(&value, true);
        self.observers.notify(&current, &value);

        SetOutcome::Changed
    }

    /// Restores the default and clears the modified flag.
    ///
    /// Always rewrites the record; notifies only if the value changed.
    /// Returns `true` if it did.
    pub fn reset(&self) -> bool {
        let previous = self.get();

        self.cache(self.default.clone(), false);
        self.persist_record(&self.default, false);

        if previous == self.default {
            return false;
        }

        tracing::info!(key = %self.key, "Reset to default {:?}", self.default);
        self.observers.notify(&previous, &self.default);
        true
    }

    /// Re-reads the stored value after an external change to the store.
    ///
    /// Skips migration and writes nothing. The value still passes through
    /// coercion and validation, so an invalid stored value reloads as the
    /// default. Notifies, and returns `true`, only if a previously cached
    /// value changed.
    pub fn reload(&self) -> bool {
        let previous = self.state.borrow().cached.clone();

        let raw = load_or(self.store.as_ref(), &self.key, self.default.clone());
        let modified = load_or(self.store.as_ref(), &self.modified_key, false);

        let coerced = self.rules.coerce(raw, &self.default);
        let value = if self.rules.validate(&coerced) {
            coerced
        } else {
            tracing::warn!(
                key = %self.key,
                "Reloaded value {coerced:?} is invalid, using default"
            );
            self.default.clone()
        };

        self.cache(value.clone(), modified);

        match previous {
            Some(old) if old != value => {
                self.observers.notify(&old, &value);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` once the value has diverged from the default through
    /// `set` (or through load-time coercion).
    pub fn is_modified(&self) -> bool {
        self.ensure_initialized();
        self.state.borrow().modified
    }

    /// Returns `true` if the current value equals the default.
    pub fn is_default(&self) -> bool {
        self.get() == self.default
    }

    /// Returns `true` once the value has been loaded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.borrow().cached.is_some()
    }

    /// Registers a change handler receiving `(old, new)`.
    pub fn subscribe(&self, handler: impl Fn(&T, &T) + 'static) -> SubscriptionId {
        self.observers.subscribe(handler)
    }

    /// Removes a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the number of subscribed handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Returns the full store key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entry metadata.
    #[must_use]
    pub const fn info(&self) -> &EntryInfo {
        &self.info
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the version of the default.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.info.version()
    }

    /// Returns the variant's rule set.
    #[must_use]
    pub const fn rules(&self) -> &R {
        &self.rules
    }

    /// Resolves the display name, falling back to the local key.
    #[must_use]
    pub fn display_name(&self, resolver: &dyn Resolver) -> String {
        self.info.name_ref().map_or_else(
            || self.info.local_key().to_string(),
            |reference| resolver.resolve(reference),
        )
    }

    /// Resolves the description, if the entry has one.
    #[must_use]
    pub fn description(&self, resolver: &dyn Resolver) -> Option<String> {
        self.info
            .description_ref()
            .map(|reference| resolver.resolve(reference))
    }

    /// Resolves the category, if the entry has one.
    #[must_use]
    pub fn category(&self, resolver: &dyn Resolver) -> Option<String> {
        self.info
            .category_ref()
            .map(|reference| resolver.resolve(reference))
    }

    fn ensure_initialized(&self) {
        if self.state.borrow().cached.is_none() {
            self.initialize();
        }
    }

    /// Loads the record and caches the outcome.
    ///
    /// An untrustworthy record (unreadable version or modified flag) is
    /// replaced wholesale by the default.
    fn initialize(&self) -> T {
        let (value, modified) = self.load_record().unwrap_or_else(|reason| {
            tracing::warn!(
                key = %self.key,
                "Settings record is unreadable ({reason}), resetting to default"
            );
            self.persist_record(&self.default, false);
            (self.default.clone(), false)
        });

        self.cache(value.clone(), modified);
        value
    }

    /// Runs the load protocol: migrate, else coerce, else load as-is.
    fn load_record(&self) -> Result<(T, bool), String> {
        let saved_version = match self.store.load(&self.version_key).decode::<i64>() {
            LoadResult::Loaded(version) => version,
            LoadResult::NotFound => 0,
            LoadResult::Corrupted { reason } => {
                return Err(format!("{}: {reason}", self.version_key));
            }
        };

        let mut modified = match self.store.load(&self.modified_key).decode::<bool>() {
            LoadResult::Loaded(flag) => flag,
            LoadResult::NotFound => false,
            LoadResult::Corrupted { reason } => {
                return Err(format!("{}: {reason}", self.modified_key));
            }
        };

        if saved_version < i64::from(self.version()) && !modified {
            tracing::info!(
                key = %self.key,
                "Adopting default {:?} (version {saved_version} -> {})",
                self.default,
                self.version()
            );
            self.persist(&self.key, self.default.to_store());
            self.persist(&self.version_key, self.version_record());
            return Ok((self.default.clone(), false));
        }

        let raw = load_or(self.store.as_ref(), &self.key, self.default.clone());
        let coerced = self.rules.coerce(raw.clone(), &self.default);

        if coerced != raw {
            tracing::warn!(key = %self.key, "Coerced stored value {raw:?} to {coerced:?}");
            self.persist(&self.key, coerced.to_store());
            // Flagged as modified so a later version bump cannot discard the
            // corrected value, even though no user chose it.
            self.persist(&self.modified_key, StoreValue::Bool(true));
            modified = true;
        }

        if !self.rules.validate(&coerced) {
            tracing::warn!(
                key = %self.key,
                "Stored value {coerced:?} is invalid, resetting to default"
            );
            self.persist_record(&self.default, false);
            return Ok((self.default.clone(), false));
        }

        Ok((coerced, modified))
    }

    fn cache(&self, value: T, modified: bool) {
        let mut state = self.state.borrow_mut();
        state.cached = Some(value);
        state.modified = modified;
    }

    fn version_record(&self) -> StoreValue {
        StoreValue::Int(i64::from(self.version()))
    }

    /// Writes value, version and modified flag as three separate saves.
    fn persist_record(&self, value: &T, modified: bool) {
        self.persist(&self.key, value.to_store());
        self.persist(&self.version_key, self.version_record());
        self.persist(&self.modified_key, StoreValue::Bool(modified));
    }

    fn persist(&self, key: &str, value: StoreValue) {
        if let Err(e) = self.store.save(key, value) {
            tracing::warn!(key, "Failed to persist setting: {e}");
        }
    }
}

impl<T: fmt::Debug, R: fmt::Debug> fmt::Debug for SettingsEntry<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsEntry")
            .field("key", &self.key)
            .field("version", &self.info.version())
            .field("default", &self.default)
            .field("rules", &self.rules)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
