//! A closed enum over all entry variants.
//!
//! Presentation layers keep heterogeneous lists of entries and edit them
//! through text; [`AnyEntry`] gives them one type to hold and dispatches to
//! the concrete variant.

use std::fmt;

use crate::keycode::KeyCode;
use crate::localization::Resolver;

use super::{
    BoolEntry, EntryInfo, FloatEntry, IndexedOptionsEntry, InputError, IntEntry, KeyCodeEntry,
    OptionsEntry, SetOutcome,
};

/// The variant of an [`AnyEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// [`BoolEntry`]
    Bool,
    /// [`FloatEntry`]
    Float,
    /// [`IntEntry`]
    Int,
    /// [`IndexedOptionsEntry`]
    Indexed,
    /// [`OptionsEntry`]
    Options,
    /// [`KeyCodeEntry`]
    KeyCode,
}

impl EntryKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Bool,
        Self::Float,
        Self::Int,
        Self::Indexed,
        Self::Options,
        Self::KeyCode,
    ];

    /// Returns the lowercase name used in schema files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Indexed => "indexed",
            Self::Options => "options",
            Self::KeyCode => "keycode",
        }
    }

    /// Looks a kind up by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any settings entry.
#[derive(Debug)]
pub enum AnyEntry {
    /// An on/off entry.
    Bool(BoolEntry),
    /// A bounded float entry.
    Float(FloatEntry),
    /// A bounded integer entry.
    Int(IntEntry),
    /// An index into option references.
    Indexed(IndexedOptionsEntry),
    /// One of a set of strings.
    Options(OptionsEntry),
    /// A key binding.
    KeyCode(KeyCodeEntry),
}

macro_rules! dispatch {
    ($any:expr, $entry:ident => $body:expr) => {
        match $any {
            AnyEntry::Bool($entry) => $body,
            AnyEntry::Float($entry) => $body,
            AnyEntry::Int($entry) => $body,
            AnyEntry::Indexed($entry) => $body,
            AnyEntry::Options($entry) => $body,
            AnyEntry::KeyCode($entry) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnyEntry {
                fn from(entry: $ty) -> Self {
                    Self::$variant(entry)
                }
            }
        )*
    };
}

impl_from!(
    Bool(BoolEntry),
    Float(FloatEntry),
    Int(IntEntry),
    Indexed(IndexedOptionsEntry),
    Options(OptionsEntry),
    KeyCode(KeyCodeEntry),
);

impl AnyEntry {
    /// Returns the full store key.
    #[must_use]
    pub fn key(&self) -> &str {
        dispatch!(self, e => e.key())
    }

    /// Returns the entry metadata.
    #[must_use]
    pub fn info(&self) -> &EntryInfo {
        dispatch!(self, e => e.info())
    }

    /// Returns the variant.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Bool(_) => EntryKind::Bool,
            Self::Float(_) => EntryKind::Float,
            Self::Int(_) => EntryKind::Int,
            Self::Indexed(_) => EntryKind::Indexed,
            Self::Options(_) => EntryKind::Options,
            Self::KeyCode(_) => EntryKind::KeyCode,
        }
    }

    /// See [`SettingsEntry::is_modified`](super::SettingsEntry::is_modified).
    pub fn is_modified(&self) -> bool {
        dispatch!(self, e => e.is_modified())
    }

    /// See [`SettingsEntry::is_default`](super::SettingsEntry::is_default).
    pub fn is_default(&self) -> bool {
        dispatch!(self, e => e.is_default())
    }

    /// See [`SettingsEntry::reset`](super::SettingsEntry::reset).
    pub fn reset(&self) -> bool {
        dispatch!(self, e => e.reset())
    }

    /// See [`SettingsEntry::reload`](super::SettingsEntry::reload).
    pub fn reload(&self) -> bool {
        dispatch!(self, e => e.reload())
    }

    /// Resolves the display name.
    #[must_use]
    pub fn display_name(&self, resolver: &dyn Resolver) -> String {
        dispatch!(self, e => e.display_name(resolver))
    }

    /// Resolves the description.
    #[must_use]
    pub fn description(&self, resolver: &dyn Resolver) -> Option<String> {
        dispatch!(self, e => e.description(resolver))
    }

    /// Resolves the category.
    #[must_use]
    pub fn category(&self, resolver: &dyn Resolver) -> Option<String> {
        dispatch!(self, e => e.category(resolver))
    }

    /// Renders the current value in the form [`set_from_str`](Self::set_from_str)
    /// accepts.
    pub fn value_text(&self) -> String {
        match self {
            Self::Bool(e) => e.get().to_string(),
            Self::Float(e) => e.get().to_string(),
            Self::Int(e) => e.get().to_string(),
            Self::Indexed(e) => e.get().to_string(),
            Self::Options(e) => e.get(),
            Self::KeyCode(e) => e.get().to_string(),
        }
    }

    /// Renders the default value like [`value_text`](Self::value_text).
    #[must_use]
    pub fn default_text(&self) -> String {
        match self {
            Self::Bool(e) => e.default_value().to_string(),
            Self::Float(e) => e.default_value().to_string(),
            Self::Int(e) => e.default_value().to_string(),
            Self::Indexed(e) => e.default_value().to_string(),
            Self::Options(e) => e.default_value().clone(),
            Self::KeyCode(e) => e.default_value().to_string(),
        }
    }

    /// Renders the current value for people: option labels are resolved and
    /// key codes use their short labels.
    pub fn display_value(&self, resolver: &dyn Resolver) -> String {
        match self {
            Self::Bool(e) => String::from(if e.get() { "on" } else { "off" }),
            Self::Indexed(e) => e.selected_label(resolver),
            Self::Options(e) => e.selected_label(resolver),
            Self::KeyCode(e) => e.label(),
            Self::Float(_) | Self::Int(_) => self.value_text(),
        }
    }

    /// Describes the accepted values.
    #[must_use]
    pub fn constraint_text(&self) -> String {
        match self {
            Self::Bool(_) => "true | false".to_string(),
            Self::Float(e) => format!("[{}, {}]", e.min(), e.max()),
            Self::Int(e) => format!("[{}, {}]", e.min(), e.max()),
            Self::Indexed(e) => e
                .options()
                .iter()
                .enumerate()
                .map(|(index, option)| format!("{index}={option}"))
                .collect::<Vec<_>>()
                .join(", "),
            Self::Options(e) => e.options().join(" | "),
            Self::KeyCode(_) => "bindable key name or code".to_string(),
        }
    }

    /// Parses `input` for this entry's kind and sets it.
    ///
    /// A well-formed value the entry's rules refuse is not an error; it
    /// yields [`SetOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidValue`] if `input` does not parse.
    pub fn set_from_str(&self, input: &str) -> Result<SetOutcome, InputError> {
        let text = input.trim();
        let outcome = match self {
            Self::Bool(e) => {
                let value = parse_bool(text).ok_or_else(|| self.invalid(input, "a boolean"))?;
                e.set(value)
            }
            Self::Float(e) => {
                let value = text.parse().map_err(|_| self.invalid(input, "a number"))?;
                e.set(value)
            }
            Self::Int(e) => {
                let value = text.parse().map_err(|_| self.invalid(input, "an integer"))?;
                e.set(value)
            }
            Self::Indexed(e) => {
                let index = text
                    .parse()
                    .ok()
                    .or_else(|| {
                        e.options()
                            .iter()
                            .position(|option| option == text)
                            .and_then(|i| i32::try_from(i).ok())
                    })
                    .ok_or_else(|| self.invalid(input, "an option index or reference"))?;
                e.set(index)
            }
            Self::Options(e) => e.set(text.to_string()),
            Self::KeyCode(e) => {
                let value = text
                    .parse::<KeyCode>()
                    .map_err(|_| self.invalid(input, "a key name or code"))?;
                e.set(value)
            }
        };

        tracing::debug!(key = self.key(), ?outcome, "Applied '{text}'");
        Ok(outcome)
    }

    /// Flips a boolean entry and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Unsupported`] for non-boolean entries.
    pub fn toggle(&self) -> Result<bool, InputError> {
        match self {
            Self::Bool(e) => Ok(e.toggle()),
            _ => Err(self.unsupported("toggle")),
        }
    }

    /// Moves to the next (or previous) choice, wrapping around, and returns
    /// the new value as text.
    ///
    /// Booleans cycle by toggling.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Unsupported`] for numeric and key code entries.
    pub fn cycle(&self, backwards: bool) -> Result<String, InputError> {
        match self {
            Self::Options(e) if backwards => Ok(e.cycle_previous()),
            Self::Options(e) => Ok(e.cycle_next()),
            Self::Indexed(e) => {
                let len = i32::try_from(e.options().len()).unwrap_or(i32::MAX);
                let step = if backwards { len - 1 } else { 1 };
                e.set((e.get() + step) % len);
                Ok(self.value_text())
            }
            Self::Bool(e) => Ok(e.toggle().to_string()),
            Self::Float(_) | Self::Int(_) | Self::KeyCode(_) => Err(self.unsupported("cycle")),
        }
    }

    fn invalid(&self, input: &str, expected: &str) -> InputError {
        InputError::InvalidValue {
            key: self.key().to_string(),
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    fn unsupported(&self, operation: &'static str) -> InputError {
        InputError::Unsupported {
            key: self.key().to_string(),
            operation,
            kind: self.kind().as_str(),
        }
    }
}

/// Parses the usual spellings of a boolean, ignoring ASCII case.
fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "on", "yes", "1"];
    const FALSE: [&str; 4] = ["false", "off", "no", "0"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}
