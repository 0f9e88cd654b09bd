//! Display-string resolution for entry metadata and option labels.
//!
//! Entries only carry opaque references (`"Tracker.Opacity.Name"`); a
//! [`Resolver`] turns them into text for presentation. Resolution never
//! influences validation or persistence.

use std::collections::HashMap;

/// Resolves an opaque reference into a display string.
pub trait Resolver {
    /// Returns the display text for `reference`.
    fn resolve(&self, reference: &str) -> String;
}

/// Resolver that displays every reference as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl Resolver for IdentityResolver {
    fn resolve(&self, reference: &str) -> String {
        reference.to_string()
    }
}

/// Table-backed resolver.
///
/// Unknown references fall back to the reference itself, so a missing
/// translation shows up as its key rather than as an empty label.
///
/// # Example
///
/// ```
/// use settings_entry::localization::{MapResolver, Resolver};
///
/// let strings = MapResolver::new([("Opacity.Name", "Tracker opacity")]);
/// assert_eq!(strings.resolve("Opacity.Name"), "Tracker opacity");
/// assert_eq!(strings.resolve("Missing.Name"), "Missing.Name");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    strings: HashMap<String, String>,
}

impl MapResolver {
    /// Creates a resolver from `(reference, text)` pairs.
    pub fn new<K, V>(strings: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            strings: strings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the number of known references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, reference: &str) -> String {
        self.strings
            .get(reference)
            .cloned()
            .unwrap_or_else(|| reference.to_string())
    }
}
