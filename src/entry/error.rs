//! Error types for entry construction and textual input.

use thiserror::Error;

/// Error returned when an entry is declared with an invalid configuration.
///
/// These indicate programming mistakes, not bad user data, and are the only
/// failures an entry ever reports. Problems with persisted data are always
/// recovered from silently (see the module docs).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The local key is empty.
    #[error("Settings key must not be empty")]
    EmptyKey,

    /// The entry version is zero.
    #[error("Entry '{key}' has version 0; versions start at 1")]
    InvalidVersion {
        /// Local key of the entry
        key: String,
    },

    /// The key, or one of its derived keys, is already taken.
    #[error("Settings key '{key}' collides with an already registered entry")]
    DuplicateKey {
        /// Full key of the rejected entry
        key: String,
    },

    /// The default value fails the entry's own validation.
    #[error("Default value {value} for '{key}' is rejected by the entry's rules")]
    InvalidDefault {
        /// Local key of the entry
        key: String,
        /// Debug rendering of the default
        value: String,
    },

    /// Range bounds are reversed or not finite.
    #[error("Entry '{key}' has an invalid range [{min}, {max}]")]
    InvalidRange {
        /// Local key of the entry
        key: String,
        /// Lower bound as given
        min: String,
        /// Upper bound as given
        max: String,
    },

    /// An options entry was declared without options.
    #[error("Entry '{key}' has no options")]
    EmptyOptions {
        /// Local key of the entry
        key: String,
    },

    /// An option set lists the same option twice.
    #[error("Entry '{key}' lists option '{option}' more than once")]
    DuplicateOption {
        /// Local key of the entry
        key: String,
        /// The repeated option
        option: String,
    },

    /// The default index does not address an option.
    #[error("Default index {index} for '{key}' is outside 0..{len}")]
    DefaultIndexOutOfBounds {
        /// Local key of the entry
        key: String,
        /// The rejected index
        index: i32,
        /// Number of options
        len: usize,
    },

    /// The default string is not a member of the option set.
    #[error("Default '{default}' for '{key}' is not one of its options")]
    UnknownDefaultOption {
        /// Local key of the entry
        key: String,
        /// The rejected default
        default: String,
    },
}

/// Error returned when textual input cannot be applied to an entry.
///
/// Produced by [`AnyEntry`](super::AnyEntry) for presentation layers that
/// edit entries through strings. A value that parses but fails validation is
/// not an error; it is reported as
/// [`SetOutcome::Rejected`](super::SetOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The text does not parse as the entry's value type.
    #[error("Invalid value '{input}' for '{key}': expected {expected}")]
    InvalidValue {
        /// Full key of the entry
        key: String,
        /// The rejected input
        input: String,
        /// Description of what would parse
        expected: String,
    },

    /// The operation does not apply to this kind of entry.
    #[error("Cannot {operation} '{key}': it is a {kind} entry")]
    Unsupported {
        /// Full key of the entry
        key: String,
        /// The attempted operation
        operation: &'static str,
        /// The entry's kind
        kind: &'static str,
    },
}
