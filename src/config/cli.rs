//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// Settings Entry: inspect and edit a settings store
///
/// Reads the entries declared in a schema file and applies them to a
/// persisted settings store, with the same validation, coercion and
/// migration the library performs at application startup.
#[derive(Debug, Parser)]
#[command(name = "settings-entry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: list)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the schema file
    #[arg(long, short, global = true)]
    pub schema: Option<PathBuf>,

    /// Path to the settings store (JSON)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Prefix prepended to every entry key
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for settings-entry
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a schema file template
    Init {
        /// Output path for the schema file
        #[arg(long, short, default_value = defaults::SCHEMA_FILE)]
        output: PathBuf,
    },

    /// List entries with their current values
    List {
        /// Regex matched against keys and display names
        #[arg(long, value_name = "REGEX")]
        filter: Option<String>,

        /// Only show entries in this category
        #[arg(long)]
        category: Option<String>,

        /// Only show entries changed by the user
        #[arg(long)]
        modified: bool,
    },

    /// Show one entry in detail
    Get {
        /// Entry key (local or prefixed)
        key: String,
    },

    /// Set an entry from text
    Set {
        /// Entry key (local or prefixed)
        key: String,
        /// New value
        value: String,
    },

    /// Restore defaults
    Reset {
        /// Entry key (local or prefixed)
        #[arg(required_unless_present = "all")]
        key: Option<String>,

        /// Reset every entry in the schema
        #[arg(long, conflicts_with = "key")]
        all: bool,
    },

    /// Flip a boolean entry
    Toggle {
        /// Entry key (local or prefixed)
        key: String,
    },

    /// Select the next option of an options entry
    Cycle {
        /// Entry key (local or prefixed)
        key: String,

        /// Select the previous option instead
        #[arg(long)]
        back: bool,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
