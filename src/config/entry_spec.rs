//! Typed entry declarations built from `[[entry]]` tables.

use crate::entry::{
    AnyEntry, BoolEntry, EntryError, EntryInfo, EntryKind, FloatEntry, IndexedOptionsEntry,
    IntEntry, KeyCodeEntry, OptionsEntry, SettingsContext,
};
use crate::keycode::KeyCode;

use super::ConfigError;
use super::toml::EntrySection;

/// Accepted `kind` names, for error messages.
pub(super) const KIND_NAMES: &str = "bool, float, int, indexed, options or keycode";

/// Kind-specific parameters of an entry declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryParams {
    /// See [`BoolEntry`].
    Bool {
        /// Default value
        default: bool,
    },
    /// See [`FloatEntry`].
    Float {
        /// Default value
        default: f32,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
    /// See [`IntEntry`].
    Int {
        /// Default value
        default: i32,
        /// Lower bound
        min: i32,
        /// Upper bound
        max: i32,
    },
    /// See [`IndexedOptionsEntry`].
    Indexed {
        /// Default index
        default: i32,
        /// Option references
        options: Vec<String>,
    },
    /// See [`OptionsEntry`].
    Options {
        /// Default option
        default: String,
        /// Allowed options
        options: Vec<String>,
    },
    /// See [`KeyCodeEntry`].
    KeyCode {
        /// Default key
        default: KeyCode,
    },
}

/// A validated entry declaration, ready to be instantiated against a
/// [`SettingsContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySpec {
    /// Identity and display references
    pub info: EntryInfo,
    /// Kind and kind-specific parameters
    pub params: EntryParams,
}

impl EntrySpec {
    /// Converts a raw `[[entry]]` table.
    ///
    /// Only checks that the fields have the right shape for the kind;
    /// semantic checks (bounds, membership, key collisions) happen in
    /// [`instantiate`](Self::instantiate).
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is unknown, a required field is
    /// missing, or a value has the wrong type.
    pub fn from_section(section: &EntrySection) -> Result<Self, ConfigError> {
        let key = section.key.as_str();
        let kind = EntryKind::from_name(&section.kind).ok_or_else(|| ConfigError::InvalidKind {
            key: key.to_string(),
            kind: section.kind.clone(),
        })?;
        let default = section.default.as_ref();

        let params = match kind {
            EntryKind::Bool => EntryParams::Bool {
                default: default
                    .map(|v| v.as_bool().ok_or_else(|| invalid(key, "default", v, "a boolean")))
                    .transpose()?
                    .unwrap_or(false),
            },
            EntryKind::Float => {
                let min = float_bound(section, "min", section.min.as_ref())?;
                let max = float_bound(section, "max", section.max.as_ref())?;
                let default = default
                    .map(|v| as_float(v).ok_or_else(|| invalid(key, "default", v, "a number")))
                    .transpose()?
                    .unwrap_or(min);
                EntryParams::Float { default, min, max }
            }
            EntryKind::Int => {
                let min = int_bound(section, "min", section.min.as_ref())?;
                let max = int_bound(section, "max", section.max.as_ref())?;
                let default = default
                    .map(|v| as_int(v).ok_or_else(|| invalid(key, "default", v, "an integer")))
                    .transpose()?
                    .unwrap_or(min);
                EntryParams::Int { default, min, max }
            }
            EntryKind::Indexed => EntryParams::Indexed {
                default: default
                    .map(|v| {
                        option_index(v, &section.options).ok_or_else(|| {
                            invalid(key, "default", v, "an option index or reference")
                        })
                    })
                    .transpose()?
                    .unwrap_or(0),
                options: section.options.clone(),
            },
            EntryKind::Options => EntryParams::Options {
                default: match default {
                    Some(v) => v
                        .as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid(key, "default", v, "a string"))?,
                    None => section.options.first().cloned().unwrap_or_default(),
                },
                options: section.options.clone(),
            },
            EntryKind::KeyCode => {
                let v = default.ok_or_else(|| ConfigError::MissingField {
                    key: key.to_string(),
                    field: "default",
                })?;
                EntryParams::KeyCode {
                    default: as_key_code(v)
                        .ok_or_else(|| invalid(key, "default", v, "a key name or code"))?,
                }
            }
        };

        let mut info = EntryInfo::new(key);
        if let Some(version) = section.version {
            info = info.with_version(version);
        }
        if let Some(name) = &section.name {
            info = info.with_name(name);
        }
        if let Some(description) = &section.description {
            info = info.with_description(description);
        }
        if let Some(category) = &section.category {
            info = info.with_category(category);
        }

        Ok(Self { info, params })
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self.params {
            EntryParams::Bool { .. } => EntryKind::Bool,
            EntryParams::Float { .. } => EntryKind::Float,
            EntryParams::Int { .. } => EntryKind::Int,
            EntryParams::Indexed { .. } => EntryKind::Indexed,
            EntryParams::Options { .. } => EntryKind::Options,
            EntryParams::KeyCode { .. } => EntryKind::KeyCode,
        }
    }

    /// Creates the entry in `context`.
    ///
    /// # Errors
    ///
    /// Returns the entry layer's construction error (invalid range, unknown
    /// default option, duplicate key...).
    pub fn instantiate(&self, context: &SettingsContext) -> Result<AnyEntry, EntryError> {
        let info = self.info.clone();
        let entry = match &self.params {
            EntryParams::Bool { default } => BoolEntry::new(context, info, *default)?.into(),
            EntryParams::Float { default, min, max } => {
                FloatEntry::new(context, info, *default, *min, *max)?.into()
            }
            EntryParams::Int { default, min, max } => {
                IntEntry::new(context, info, *default, *min, *max)?.into()
            }
            EntryParams::Indexed { default, options } => {
                IndexedOptionsEntry::new(context, info, *default, options.iter().cloned())?.into()
            }
            EntryParams::Options { default, options } => {
                OptionsEntry::new(context, info, default.clone(), options.iter().cloned())?.into()
            }
            EntryParams::KeyCode { default } => KeyCodeEntry::new(context, info, *default)?.into(),
        };
        Ok(entry)
    }
}

fn invalid(
    key: &str,
    field: &'static str,
    value: &toml::Value,
    expected: &'static str,
) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        field,
        value: value.to_string(),
        expected,
    }
}

fn float_bound(
    section: &EntrySection,
    field: &'static str,
    value: Option<&toml::Value>,
) -> Result<f32, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingField {
        key: section.key.clone(),
        field,
    })?;
    as_float(value).ok_or_else(|| invalid(&section.key, field, value, "a number"))
}

fn int_bound(
    section: &EntrySection,
    field: &'static str,
    value: Option<&toml::Value>,
) -> Result<i32, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingField {
        key: section.key.clone(),
        field,
    })?;
    as_int(value).ok_or_else(|| invalid(&section.key, field, value, "an integer"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_float(value: &toml::Value) -> Option<f32> {
    match value {
        toml::Value::Float(f) => Some(*f as f32),
        toml::Value::Integer(i) => Some(*i as f32),
        _ => None,
    }
}

fn as_int(value: &toml::Value) -> Option<i32> {
    value.as_integer().and_then(|i| i32::try_from(i).ok())
}

/// Accepts a numeric index or the reference of one of `options`.
fn option_index(value: &toml::Value, options: &[String]) -> Option<i32> {
    match value {
        toml::Value::Integer(i) => i32::try_from(*i).ok(),
        toml::Value::String(s) => options
            .iter()
            .position(|option| option == s)
            .and_then(|i| i32::try_from(i).ok()),
        _ => None,
    }
}

fn as_key_code(value: &toml::Value) -> Option<KeyCode> {
    match value {
        toml::Value::String(s) => s.parse().ok(),
        toml::Value::Integer(i) => i32::try_from(*i).ok().map(KeyCode),
        _ => None,
    }
}
