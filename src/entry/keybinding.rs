use crate::keycode::KeyCode;

use super::{EntryError, EntryInfo, EntryRules, SettingsContext, SettingsEntry};

/// Rule set admitting only bindable key codes.
///
/// The domain has no useful order, so a stored code that is not bindable
/// falls back to the default instead of being clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindableKey;

impl EntryRules<KeyCode> for BindableKey {
    fn validate(&self, value: &KeyCode) -> bool {
        value.is_bindable()
    }

    fn coerce(&self, value: KeyCode, default: &KeyCode) -> KeyCode {
        if value.is_bindable() {
            value
        } else {
            tracing::debug!("Key code {value} is not bindable, using {default}");
            *default
        }
    }
}

/// A key binding.
pub type KeyCodeEntry = SettingsEntry<KeyCode, BindableKey>;

impl SettingsEntry<KeyCode, BindableKey> {
    /// Creates a key binding entry.
    ///
    /// # Errors
    ///
    /// Returns an error if `default` is not bindable or the key is invalid.
    pub fn new(
        context: &SettingsContext,
        info: EntryInfo,
        default: KeyCode,
    ) -> Result<Self, EntryError> {
        Self::with_rules(context, info, default, BindableKey)
    }

    /// Returns the short display label of the bound key.
    pub fn label(&self) -> String {
        self.get().label().into_owned()
    }
}
