//! Configuration layer for the settings-entry binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML schema file parsing ([`SchemaFile`])
//! - Typed entry declarations ([`EntrySpec`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Schema file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! The store path and key prefix are resolved with the following priority
//! (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--store`, `--prefix`
//! 2. **Schema file** - the `[store]` section
//! 3. **Built-in defaults** - see [`defaults`]
//!
//! Entries are only ever declared in the schema file.
//!
//! # Entry Defaults
//!
//! An `[[entry]]` without a `default` starts at `false` (bool), its lower
//! bound (float, int), index 0 (indexed) or its first option (options).
//! Key code entries must name their default.

mod cli;
pub mod defaults;
mod entry_spec;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use entry_spec::{EntryParams, EntrySpec};
pub use error::ConfigError;
pub use toml::{EntrySection, SchemaFile, StoreSection, default_config_template};
pub use validated::{Action, ValidatedConfig, write_default_config};
