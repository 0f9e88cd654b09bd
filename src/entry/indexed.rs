//! Index-based enumerated entries.

use crate::localization::Resolver;

use super::{EntryError, EntryInfo, EntryRules, SettingsContext, SettingsEntry};

/// Rule set for an index into a fixed list of option references.
///
/// Stored indices outside the list are clamped to the nearest end, never
/// reset to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedOptions {
    options: Vec<String>,
}

impl IndexedOptions {
    /// Returns the option references.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the option at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: i32) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    fn last_index(&self) -> i32 {
        i32::try_from(self.options.len().saturating_sub(1)).unwrap_or(i32::MAX)
    }
}

impl EntryRules<i32> for IndexedOptions {
    fn validate(&self, value: &i32) -> bool {
        self.get(*value).is_some()
    }

    fn coerce(&self, value: i32, _default: &i32) -> i32 {
        let clamped = value.clamp(0, self.last_index());
        if clamped != value {
            tracing::debug!("Option index {value} out of bounds, using {clamped}");
        }
        clamped
    }
}

/// A choice stored as an index into a list of option references.
pub type IndexedOptionsEntry = SettingsEntry<i32, IndexedOptions>;

impl SettingsEntry<i32, IndexedOptions> {
    /// Creates an entry selecting one of `options` by index.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` is empty, `default_index` does not
    /// address an option, or the key is invalid.
    pub fn new<S: Into<String>>(
        context: &SettingsContext,
        info: EntryInfo,
        default_index: i32,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, EntryError> {
        let rules = IndexedOptions {
            options: options.into_iter().map(Into::into).collect(),
        };

        if rules.options.is_empty() {
            return Err(EntryError::EmptyOptions {
                key: info.local_key().to_string(),
            });
        }
        if rules.get(default_index).is_none() {
            return Err(EntryError::DefaultIndexOutOfBounds {
                key: info.local_key().to_string(),
                index: default_index,
                len: rules.options.len(),
            });
        }

        Self::with_rules(context, info, default_index, rules)
    }

    /// Returns the option references.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.rules().options()
    }

    /// Returns the reference of the selected option.
    pub fn selected_option(&self) -> &str {
        // Cached indices always validate, so the fallback is unreachable.
        self.rules().get(self.get()).unwrap_or_default()
    }

    /// Resolves the selected option's display label.
    pub fn selected_label(&self, resolver: &dyn Resolver) -> String {
        resolver.resolve(self.selected_option())
    }

    /// Resolves every option's display label, in index order.
    pub fn option_labels(&self, resolver: &dyn Resolver) -> Vec<String> {
        self.options()
            .iter()
            .map(|option| resolver.resolve(option))
            .collect()
    }
}
