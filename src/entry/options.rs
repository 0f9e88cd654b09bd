//! Value-based enumerated entries.

use std::collections::BTreeSet;

use crate::localization::Resolver;

use super::{EntryError, EntryInfo, EntryRules, SetOutcome, SettingsContext, SettingsEntry};

/// Rule set for a string drawn from a fixed set of options.
///
/// A stored string outside the set falls back to the default; there is no
/// notion of a nearest member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<String>,
}

impl OptionSet {
    /// Returns the options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the position of `value`, if it is an option.
    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option == value)
    }
}

impl EntryRules<String> for OptionSet {
    fn validate(&self, value: &String) -> bool {
        self.position(value).is_some()
    }

    fn coerce(&self, value: String, default: &String) -> String {
        if self.validate(&value) {
            value
        } else {
            tracing::debug!("Unknown option '{value}', using '{default}'");
            default.clone()
        }
    }
}

/// A choice stored as one of a fixed set of strings.
pub type OptionsEntry = SettingsEntry<String, OptionSet>;

impl SettingsEntry<String, OptionSet> {
    /// Creates an entry holding one of `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` is empty or repeats a value, `default`
    /// is not one of them, or the key is invalid.
    pub fn new<S: Into<String>>(
        context: &SettingsContext,
        info: EntryInfo,
        default: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, EntryError> {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let default = default.into();

        if options.is_empty() {
            return Err(EntryError::EmptyOptions {
                key: info.local_key().to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        if let Some(repeated) = options.iter().find(|option| !seen.insert(option.as_str())) {
            return Err(EntryError::DuplicateOption {
                key: info.local_key().to_string(),
                option: repeated.clone(),
            });
        }

        let rules = OptionSet { options };
        if !rules.validate(&default) {
            return Err(EntryError::UnknownDefaultOption {
                key: info.local_key().to_string(),
                default,
            });
        }

        Self::with_rules(context, info, default, rules)
    }

    /// Returns the options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.rules().options()
    }

    /// Returns the position of the current value among the options.
    pub fn selected_index(&self) -> usize {
        self.rules().position(&self.get()).unwrap_or_default()
    }

    /// Selects the option at `index`; an index past the end is rejected.
    pub fn set_selected_index(&self, index: usize) -> SetOutcome {
        match self.options().get(index) {
            Some(option) => self.set(option.clone()),
            None => SetOutcome::Rejected,
        }
    }

    /// Advances to the next option, wrapping to the first, and returns it.
    pub fn cycle_next(&self) -> String {
        let len = self.options().len();
        self.cycle_to((self.selected_index() + 1) % len)
    }

    /// Steps back to the previous option, wrapping to the last, and returns it.
    pub fn cycle_previous(&self) -> String {
        let len = self.options().len();
        self.cycle_to((self.selected_index() + len - 1) % len)
    }

    /// Resolves every option's display label, in declaration order.
    pub fn option_labels(&self, resolver: &dyn Resolver) -> Vec<String> {
        self.options()
            .iter()
            .map(|option| resolver.resolve(option))
            .collect()
    }

    /// Resolves the current option's display label.
    pub fn selected_label(&self, resolver: &dyn Resolver) -> String {
        resolver.resolve(&self.get())
    }

    fn cycle_to(&self, index: usize) -> String {
        self.set_selected_index(index);
        self.get()
    }
}
