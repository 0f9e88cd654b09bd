//! Validation and coercion hooks implemented by entry variants.

/// Per-variant policy plugged into [`SettingsEntry`](super::SettingsEntry).
///
/// - `validate` decides whether a value may be cached at all. It guards
///   both explicit `set` calls and values read from the store.
/// - `coerce` runs on stored values only, before validation, and may turn
///   an out-of-domain value into a valid one. Whether a variant clamps,
///   snaps or falls back to `default` here is part of its persisted-data
///   contract and must not change between releases.
pub trait EntryRules<T> {
    /// Returns `true` if `value` is acceptable.
    fn validate(&self, _value: &T) -> bool {
        true
    }

    /// Corrects a stored value; the default implementation keeps it as-is.
    fn coerce(&self, value: T, _default: &T) -> T {
        value
    }
}

/// Rule set that accepts every value unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconstrained;

impl<T> EntryRules<T> for Unconstrained {}
