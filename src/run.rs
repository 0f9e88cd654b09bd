//! Application execution logic.
//!
//! Opens the settings store, instantiates the declared entries and applies
//! the requested action, writing human-readable output to the given writer.

use std::io::{self, Write};
use std::rc::Rc;

use thiserror::Error;

use settings_entry::config::{Action, ValidatedConfig};
use settings_entry::entry::{AnyEntry, EntryError, InputError, SetOutcome, SettingsContext};
use settings_entry::localization::MapResolver;
use settings_entry::store::FileStore;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// No declared entry matches the given key.
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),

    /// An entry could not be created over the store.
    #[error("Failed to create entry: {0}")]
    Entry(#[from] EntryError),

    /// The input could not be applied to the entry.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The value parsed but the entry's rules refused it.
    #[error("Value '{value}' rejected for '{key}': expected {constraint}")]
    Rejected {
        /// Full key of the entry
        key: String,
        /// The rejected input
        value: String,
        /// Description of the accepted values
        constraint: String,
    },

    /// Failed to write command output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Entries instantiated over the configured store.
struct Session {
    context: SettingsContext,
    entries: Vec<AnyEntry>,
}

impl Session {
    fn open(config: &ValidatedConfig) -> Result<Self, RunError> {
        let store = Rc::new(FileStore::open(&config.store_path));
        let resolver = Rc::new(MapResolver::new(&config.strings));
        let context = SettingsContext::new(store, config.prefix.as_str()).with_resolver(resolver);

        let entries = config
            .entries
            .iter()
            .map(|spec| spec.instantiate(&context))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            store = %config.store_path.display(),
            entries = entries.len(),
            "Opened settings store"
        );

        Ok(Self { context, entries })
    }

    /// Finds an entry by its full key or its local key.
    fn find(&self, key: &str) -> Result<&AnyEntry, RunError> {
        self.entries
            .iter()
            .find(|entry| entry.key() == key || entry.info().local_key() == key)
            .ok_or_else(|| RunError::UnknownKey(key.to_string()))
    }

    fn matches_category(&self, entry: &AnyEntry, wanted: &str) -> bool {
        let Some(reference) = entry.info().category_ref() else {
            return false;
        };
        reference.eq_ignore_ascii_case(wanted)
            || self
                .context
                .resolver()
                .resolve(reference)
                .eq_ignore_ascii_case(wanted)
    }
}

/// Executes the configured action.
///
/// # Errors
///
/// Returns an error if:
/// - An entry cannot be created over the store
/// - The key names no declared entry
/// - The value does not parse or is rejected by the entry
/// - Writing to `out` fails
pub fn execute(config: &ValidatedConfig, out: &mut impl Write) -> Result<(), RunError> {
    let session = Session::open(config)?;

    match &config.action {
        Action::List {
            filter,
            category,
            modified_only,
        } => {
            let selected: Vec<&AnyEntry> = session
                .entries
                .iter()
                .filter(|entry| {
                    filter.as_ref().is_none_or(|re| {
                        re.is_match(entry.key())
                            || re.is_match(&entry.display_name(session.context.resolver()))
                    })
                })
                .filter(|entry| {
                    category
                        .as_deref()
                        .is_none_or(|wanted| session.matches_category(entry, wanted))
                })
                .filter(|entry| !modified_only || entry.is_modified())
                .collect();
            print_list(&session, &selected, out)
        }
        Action::Get { key } => print_details(&session, session.find(key)?, out),
        Action::Set { key, value } => set_value(session.find(key)?, value, out),
        Action::Reset { key: Some(key) } => reset_one(session.find(key)?, out),
        Action::Reset { key: None } => reset_all(&session, out),
        Action::Toggle { key } => {
            let entry = session.find(key)?;
            let value = entry.toggle()?;
            writeln!(out, "{} = {value}", entry.key())?;
            Ok(())
        }
        Action::Cycle { key, backwards } => {
            let entry = session.find(key)?;
            entry.cycle(*backwards)?;
            writeln!(
                out,
                "{} = {}",
                entry.key(),
                entry.display_value(session.context.resolver())
            )?;
            Ok(())
        }
    }
}

fn print_list(
    session: &Session,
    entries: &[&AnyEntry],
    out: &mut impl Write,
) -> Result<(), RunError> {
    if entries.is_empty() {
        writeln!(out, "No matching settings")?;
        return Ok(());
    }

    let resolver = session.context.resolver();
    let width = entries.iter().map(|e| e.key().len()).max().unwrap_or(0);

    for entry in entries {
        let marker = if entry.is_modified() { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {key:<width$}  {value:<12}  {name}",
            key = entry.key(),
            value = entry.display_value(resolver),
            name = entry.display_name(resolver),
        )?;
    }
    Ok(())
}

fn print_details(
    session: &Session,
    entry: &AnyEntry,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let resolver = session.context.resolver();

    writeln!(out, "key:         {}", entry.key())?;
    writeln!(out, "name:        {}", entry.display_name(resolver))?;
    writeln!(out, "kind:        {}", entry.kind())?;
    writeln!(out, "value:       {}", entry.display_value(resolver))?;
    writeln!(out, "raw:         {}", entry.value_text())?;
    writeln!(out, "default:     {}", entry.default_text())?;
    writeln!(out, "accepts:     {}", entry.constraint_text())?;
    writeln!(out, "version:     {}", entry.info().version())?;
    writeln!(
        out,
        "modified:    {}",
        if entry.is_modified() { "yes" } else { "no" }
    )?;
    if let Some(category) = entry.category(resolver) {
        writeln!(out, "category:    {category}")?;
    }
    if let Some(description) = entry.description(resolver) {
        writeln!(out, "description: {description}")?;
    }
    Ok(())
}

fn set_value(entry: &AnyEntry, value: &str, out: &mut impl Write) -> Result<(), RunError> {
    match entry.set_from_str(value)? {
        SetOutcome::Changed => writeln!(out, "{} = {}", entry.key(), entry.value_text())?,
        SetOutcome::Unchanged => writeln!(
            out,
            "{} unchanged ({})",
            entry.key(),
            entry.value_text()
        )?,
        SetOutcome::Rejected => {
            return Err(RunError::Rejected {
                key: entry.key().to_string(),
                value: value.to_string(),
                constraint: entry.constraint_text(),
            });
        }
    }
    Ok(())
}

fn reset_one(entry: &AnyEntry, out: &mut impl Write) -> Result<(), RunError> {
    if entry.reset() {
        writeln!(
            out,
            "{} reset to default ({})",
            entry.key(),
            entry.value_text()
        )?;
    } else {
        writeln!(out, "{} already at default", entry.key())?;
    }
    Ok(())
}

fn reset_all(session: &Session, out: &mut impl Write) -> Result<(), RunError> {
    let changed = session.entries.iter().filter(|entry| entry.reset()).count();
    tracing::info!(changed, total = session.entries.len(), "Reset all settings");
    writeln!(
        out,
        "Reset {changed} of {} settings",
        session.entries.len()
    )?;
    Ok(())
}
