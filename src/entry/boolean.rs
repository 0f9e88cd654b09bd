use super::{EntryError, EntryInfo, SettingsContext, SettingsEntry, Unconstrained};

/// An on/off setting. Every `bool` is valid, so loads never coerce.
pub type BoolEntry = SettingsEntry<bool>;

impl SettingsEntry<bool> {
    /// Creates a boolean entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or taken, or the version is 0.
    pub fn new(
        context: &SettingsContext,
        info: EntryInfo,
        default: bool,
    ) -> Result<Self, EntryError> {
        Self::with_rules(context, info, default, Unconstrained)
    }

    /// Flips the value and returns the new one.
    pub fn toggle(&self) -> bool {
        let next = !self.get();
        self.set(next);
        next
    }
}
