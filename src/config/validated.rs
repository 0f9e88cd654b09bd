//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use regex::Regex;

use crate::entry::SettingsContext;
use crate::store::MemoryStore;

use super::cli::{Cli, Command};
use super::defaults;
use super::entry_spec::EntrySpec;
use super::error::ConfigError;
use super::toml::SchemaFile;

/// What the binary should do with the store.
#[derive(Debug)]
pub enum Action {
    /// Print entries matching every given criterion.
    List {
        /// Matched against keys and display names
        filter: Option<Regex>,
        /// Matched against the category reference or its resolved text
        category: Option<String>,
        /// Only entries with the modified flag set
        modified_only: bool,
    },
    /// Print one entry in detail.
    Get {
        /// Entry key
        key: String,
    },
    /// Set an entry from text.
    Set {
        /// Entry key
        key: String,
        /// Textual value
        value: String,
    },
    /// Restore one entry, or all of them, to the default.
    Reset {
        /// Entry key; `None` resets every entry
        key: Option<String>,
    },
    /// Flip a boolean entry.
    Toggle {
        /// Entry key
        key: String,
    },
    /// Select the next or previous option.
    Cycle {
        /// Entry key
        key: String,
        /// Step backwards
        backwards: bool,
    },
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and a parsed
/// schema. Every declared entry is instantiated once against a scratch
/// store, so schema mistakes surface here rather than halfway through a
/// command.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Path of the JSON settings store
    pub store_path: PathBuf,

    /// Prefix prepended to every entry key
    pub prefix: String,

    /// Display strings keyed by reference
    pub strings: BTreeMap<String, String>,

    /// Declared entries, in schema order
    pub entries: Vec<EntrySpec>,

    /// Command to execute
    pub action: Action,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.prefix.is_empty() {
            "none"
        } else {
            self.prefix.as_str()
        };

        write!(
            f,
            "Config {{ store: {}, prefix: {}, entries: {}, strings: {} }}",
            self.store_path.display(),
            prefix,
            self.entries.len(),
            self.strings.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and a schema.
    ///
    /// CLI arguments take precedence over schema values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An entry has an unknown kind, a missing field or a mistyped value
    /// - An entry is rejected on construction (bad range, duplicate key...)
    /// - The `--filter` regex is invalid
    pub fn from_raw(cli: &Cli, schema: &SchemaFile) -> Result<Self, ConfigError> {
        let store_path = Self::resolve_store_path(cli, schema);
        let prefix = Self::resolve_prefix(cli, schema);
        let entries = Self::build_entries(schema, &prefix)?;
        let action = Self::build_action(cli)?;

        Ok(Self {
            store_path,
            prefix,
            strings: schema.strings.clone(),
            entries,
            action,
            verbose: cli.verbose,
        })
    }

    /// Loads the schema and merges it with the CLI arguments.
    ///
    /// Reads `cli.schema`, or [`defaults::SCHEMA_FILE`] when it is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The schema file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .schema
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::SCHEMA_FILE));
        let schema = SchemaFile::load(&path)?;

        Self::from_raw(cli, &schema)
    }

    fn resolve_store_path(cli: &Cli, schema: &SchemaFile) -> PathBuf {
        // Priority: CLI explicit > schema > default
        if let Some(ref path) = cli.store {
            return path.clone();
        }

        schema
            .store
            .path
            .as_deref()
            .map_or_else(defaults::store_path, expand_home)
    }

    fn resolve_prefix(cli: &Cli, schema: &SchemaFile) -> String {
        cli.prefix
            .as_deref()
            .or(schema.store.prefix.as_deref())
            .unwrap_or(defaults::PREFIX)
            .to_string()
    }

    fn build_entries(schema: &SchemaFile, prefix: &str) -> Result<Vec<EntrySpec>, ConfigError> {
        let entries = schema
            .entries
            .iter()
            .map(EntrySpec::from_section)
            .collect::<Result<Vec<_>, _>>()?;

        // Dry run against a scratch store: catches bad ranges, unknown
        // defaults and key collisions without touching the real store.
        let scratch = SettingsContext::new(Rc::new(MemoryStore::new()), prefix);
        for spec in &entries {
            spec.instantiate(&scratch)?;
        }

        Ok(entries)
    }

    fn build_action(cli: &Cli) -> Result<Action, ConfigError> {
        let action = match &cli.command {
            None | Some(Command::Init { .. }) => Action::List {
                filter: None,
                category: None,
                modified_only: false,
            },
            Some(Command::List {
                filter,
                category,
                modified,
            }) => Action::List {
                filter: filter.as_deref().map(compile_filter).transpose()?,
                category: category.clone(),
                modified_only: *modified,
            },
            Some(Command::Get { key }) => Action::Get { key: key.clone() },
            Some(Command::Set { key, value }) => Action::Set {
                key: key.clone(),
                value: value.clone(),
            },
            Some(Command::Reset { key, all }) => Action::Reset {
                key: if *all { None } else { key.clone() },
            },
            Some(Command::Toggle { key }) => Action::Toggle { key: key.clone() },
            Some(Command::Cycle { key, back }) => Action::Cycle {
                key: key.clone(),
                backwards: *back,
            },
        };

        Ok(action)
    }
}

/// Writes the schema template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Case-insensitive unless the pattern says otherwise.
fn compile_filter(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("(?i){pattern}")).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
