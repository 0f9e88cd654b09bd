//! Typed, persisted, self-migrating settings entries.
//!
//! This module provides:
//! - The generic entry core ([`SettingsEntry`]) with lazy load, validation,
//!   coercion, version migration, change notification and reset
//! - The application context that owns the store ([`SettingsContext`])
//! - Variant rule sets and their entry aliases:
//!   [`BoolEntry`], [`FloatEntry`], [`IntEntry`], [`IndexedOptionsEntry`],
//!   [`OptionsEntry`], [`KeyCodeEntry`]
//! - A closed enum over all variants for heterogeneous lists ([`AnyEntry`])
//!
//! # Persisted Layout
//!
//! An entry with key `K` owns three store keys:
//!
//! | Key          | Type | Meaning                                   |
//! |--------------|------|-------------------------------------------|
//! | `K`          | any  | The value                                 |
//! | `K_Version`  | int  | Version of the default the value was written under |
//! | `K_Modified` | bool | The value diverged from the default       |
//!
//! # Load Order
//!
//! On the first [`SettingsEntry::get`], exactly one of these applies:
//!
//! 1. **Migration** - the stored version is older than the entry's and the
//!    user never modified the value: the new default is adopted.
//! 2. **Coercion** - the variant corrects an out-of-domain stored value
//!    (clamping a float, snapping an index, falling back to the default).
//! 3. **As-is** - the stored value is used unchanged.
//!
//! A value that still fails validation after coercion is discarded and the
//! whole record is reset to the default.
//!
//! # Threading
//!
//! Entries are single-threaded (`!Send`, `!Sync`). A multi-threaded host
//! must guard each entry, or the shared store, with its own lock: the lazy
//! initialization check-then-act is not atomic.

mod any;
mod base;
mod boolean;
mod context;
mod error;
mod indexed;
mod info;
mod keybinding;
mod observer;
mod options;
mod range;
mod rules;

#[cfg(test)]
mod keybinding_tests;
#[cfg(test)]
mod test_fixtures;

pub use any::{AnyEntry, EntryKind};
pub use base::{SetOutcome, SettingsEntry};
pub use boolean::BoolEntry;
pub use context::{SettingsContext, modified_key, version_key};
pub use error::{EntryError, InputError};
pub use indexed::{IndexedOptions, IndexedOptionsEntry};
pub use info::EntryInfo;
pub use keybinding::{BindableKey, KeyCodeEntry};
pub use observer::SubscriptionId;
pub use options::{OptionSet, OptionsEntry};
pub use range::{FloatEntry, IntEntry, Range, RangeValue};
pub use rules::{EntryRules, Unconstrained};
