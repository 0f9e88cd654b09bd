//! Default values for configuration options.

use std::path::PathBuf;

/// Schema file read when `--schema` is not given.
pub const SCHEMA_FILE: &str = "settings.toml";

/// File name of the default settings store.
pub const STORE_FILE_NAME: &str = "settings.json";

/// Directory under the platform config dir holding the default store.
pub const APP_DIR: &str = "settings-entry";

/// Default key prefix (empty: entries use their local keys).
pub const PREFIX: &str = "";

/// Default settings store location.
///
/// Lives in the platform config directory, or the working directory when
/// none is known.
#[must_use]
pub fn store_path() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(STORE_FILE_NAME),
        |dir| dir.join(APP_DIR).join(STORE_FILE_NAME),
    )
}
