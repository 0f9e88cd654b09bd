//! Identity and display metadata of an entry.

/// Declares an entry's local key, version and display references.
///
/// Display references are opaque; they are only ever handed to a
/// [`Resolver`](crate::localization::Resolver).
///
/// # Example
///
/// ```
/// use settings_entry::entry::EntryInfo;
///
/// let info = EntryInfo::new("Opacity")
///     .with_version(2)
///     .with_name("Tracker.Opacity.Name")
///     .with_category("Tracker.Category");
///
/// assert_eq!(info.local_key(), "Opacity");
/// assert_eq!(info.version(), 2);
/// assert_eq!(info.description_ref(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    local_key: String,
    version: u32,
    name_ref: Option<String>,
    description_ref: Option<String>,
    category_ref: Option<String>,
}

impl EntryInfo {
    /// Version given to entries that do not set one.
    pub const DEFAULT_VERSION: u32 = 1;

    /// Creates metadata for `local_key` at [`Self::DEFAULT_VERSION`].
    #[must_use]
    pub fn new(local_key: impl Into<String>) -> Self {
        Self {
            local_key: local_key.into(),
            version: Self::DEFAULT_VERSION,
            name_ref: None,
            description_ref: None,
            category_ref: None,
        }
    }

    /// Sets the schema version of the default value.
    ///
    /// Bump it whenever the default changes; users who never touched the
    /// entry then receive the new default on next load. Versions must never
    /// decrease for a deployed key.
    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the display-name reference.
    #[must_use]
    pub fn with_name(mut self, reference: impl Into<String>) -> Self {
        self.name_ref = Some(reference.into());
        self
    }

    /// Sets the description reference.
    #[must_use]
    pub fn with_description(mut self, reference: impl Into<String>) -> Self {
        self.description_ref = Some(reference.into());
        self
    }

    /// Sets the category reference.
    #[must_use]
    pub fn with_category(mut self, reference: impl Into<String>) -> Self {
        self.category_ref = Some(reference.into());
        self
    }

    /// Returns the key relative to the context prefix.
    #[must_use]
    pub fn local_key(&self) -> &str {
        &self.local_key
    }

    /// Returns the schema version of the default.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the display-name reference, if any.
    #[must_use]
    pub fn name_ref(&self) -> Option<&str> {
        self.name_ref.as_deref()
    }

    /// Returns the description reference, if any.
    #[must_use]
    pub fn description_ref(&self) -> Option<&str> {
        self.description_ref.as_deref()
    }

    /// Returns the category reference, if any.
    #[must_use]
    pub fn category_ref(&self) -> Option<&str> {
        self.category_ref.as_deref()
    }
}
