//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::entry::EntryError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the schema file.
    #[error("Failed to read schema file '{}': {source}", path.display())]
    FileRead {
        /// Path to the schema file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML schema.
    #[error("Failed to parse TOML schema: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the schema file (for init command).
    #[error("Failed to write schema file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the schema file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An entry declares an unknown kind.
    #[error("Entry '{key}' has unknown kind '{kind}': expected {}", super::entry_spec::KIND_NAMES)]
    InvalidKind {
        /// Local key of the entry
        key: String,
        /// The rejected kind
        kind: String,
    },

    /// An entry's default (or bound) has the wrong type or cannot be parsed.
    #[error("Entry '{key}' has invalid {field} {value}: expected {expected}")]
    InvalidValue {
        /// Local key of the entry
        key: String,
        /// Offending field
        field: &'static str,
        /// The rejected value, as written in the schema
        value: String,
        /// Description of what would be accepted
        expected: &'static str,
    },

    /// A field the entry's kind requires is absent.
    #[error("Entry '{key}' is missing required field '{field}'")]
    MissingField {
        /// Local key of the entry
        key: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Invalid regex pattern for list filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// An entry is rejected by the entry layer (duplicate key, bad range...).
    #[error("Invalid entry: {0}")]
    Entry(#[from] EntryError),
}
