//! TOML schema file parsing.
//!
//! Defines the structure of the schema file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root structure of a schema file.
///
/// Every section is optional so that CLI arguments and built-in defaults
/// can fill in what the file leaves out.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Store location and key prefix
    #[serde(default)]
    pub store: StoreSection,

    /// Display strings keyed by reference
    #[serde(default)]
    pub strings: BTreeMap<String, String>,

    /// Declared entries, in display order
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntrySection>,
}

/// Store configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Path of the JSON store (`~/` is expanded)
    pub path: Option<String>,

    /// Prefix prepended to every entry key
    pub prefix: Option<String>,
}

/// One `[[entry]]` table.
///
/// Which fields apply depends on `kind`; the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySection {
    /// Local key
    pub key: String,

    /// One of bool, float, int, indexed, options, keycode
    pub kind: String,

    /// Default value; its type depends on `kind`
    pub default: Option<toml::Value>,

    /// Version of the default (default: 1)
    pub version: Option<u32>,

    /// Display-name reference
    pub name: Option<String>,

    /// Description reference
    pub description: Option<String>,

    /// Category reference
    pub category: Option<String>,

    /// Lower bound (float, int)
    pub min: Option<toml::Value>,

    /// Upper bound (float, int)
    pub max: Option<toml::Value>,

    /// Option references (indexed) or option values (options)
    #[serde(default)]
    pub options: Vec<String>,
}

impl SchemaFile {
    /// Loads a schema from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a schema from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a schema file template with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Settings Entry Schema File
#
# Declares the settings of one feature. Each [[entry]] becomes a typed,
# persisted setting stored under "<prefix>_<key>" along with
# "<key>_Version" and "<key>_Modified".

[store]
# Path of the JSON settings store (default: <config dir>/settings-entry/settings.json)
# path = "~/.config/my-app/settings.json"

# Prefix prepended to every key (default: none)
prefix = "Tracker"

[strings]
# Display strings for name/description/category/option references.
# Unknown references are shown as-is.
"Tracker.Category.Display" = "Display"
"Tracker.Category.Input" = "Input"
"Tracker.Enabled.Name" = "Enable tracker"
"Tracker.Opacity.Name" = "Overlay opacity"
"Tracker.Quality.Low" = "Low"
"Tracker.Quality.High" = "High"

# Kinds and their fields:
#   bool     default = true | false                       (default: false)
#   float    default, min, max (numbers)                   (default: min)
#   int      default, min, max (integers)                  (default: min)
#   indexed  options = [references], default = index      (default: 0)
#   options  options = [values], default = value          (default: first option)
#   keycode  default = key name ("F9", "Keypad5", "Mouse3") or code (required)
#
# Bump "version" whenever a default changes: users who never touched the
# entry receive the new default; customized values are kept.

[[entry]]
key = "Enabled"
kind = "bool"
default = true
name = "Tracker.Enabled.Name"
category = "Tracker.Category.Display"

[[entry]]
key = "Opacity"
kind = "float"
default = 0.8
min = 0.0
max = 1.0
name = "Tracker.Opacity.Name"
category = "Tracker.Category.Display"

[[entry]]
key = "HistoryLength"
kind = "int"
default = 20
min = 1
max = 100
version = 2

[[entry]]
key = "Quality"
kind = "indexed"
options = ["Tracker.Quality.Low", "Tracker.Quality.High"]
default = 1

[[entry]]
key = "Position"
kind = "options"
options = ["TopLeft", "TopRight", "BottomLeft", "BottomRight"]
default = "TopRight"

[[entry]]
key = "ToggleKey"
kind = "keycode"
default = "F9"
category = "Tracker.Category.Input"
"#
    .to_string()
}
