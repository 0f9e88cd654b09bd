//! File-based store implementation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LoadResult, SettingsStore, StoreError, StoreValue};

/// Current settings file format version.
///
/// Increment this when making breaking changes to the format.
const STORE_FILE_VERSION: u32 = 1;

/// On-disk settings file format.
///
/// Values are kept as raw JSON so that a single malformed key does not make
/// the whole document unreadable; each key is checked when it is loaded.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    /// Format version for future compatibility.
    version: u32,

    /// Unix timestamp when the file was written.
    /// For debugging purposes only; not used in logic.
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,

    /// Stored settings keyed by their full key.
    #[serde(default)]
    values: BTreeMap<String, Value>,
}

impl StoreFile {
    fn new(values: &BTreeMap<String, Value>) -> Self {
        Self {
            version: STORE_FILE_VERSION,
            saved_at: Some(unix_timestamp_now()),
            values: values.clone(),
        }
    }
}

/// Returns the current Unix timestamp as a string.
fn unix_timestamp_now() -> String {
    use std::time::SystemTime;

    let now = SystemTime::now();
    let duration = now
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", duration.as_secs())
}

/// File-based implementation of [`SettingsStore`].
///
/// Keeps the whole document in memory and rewrites it on every save.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// Each single `save` is therefore all-or-nothing on disk. A sequence of
/// saves (such as the three keys of one entry record) is not.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Opens the settings file at `path`.
    ///
    /// Never fails: a missing file yields an empty store, and an unreadable
    /// or incompatible file is logged and replaced on the next save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_document(&path);
        Self {
            path,
            values: RefCell::new(values),
        }
    }

    /// Returns the path to the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file, picking up changes made by other processes.
    ///
    /// Entries still hold their cached values; call
    /// [`SettingsEntry::reload`](crate::entry::SettingsEntry::reload) on them
    /// afterwards.
    pub fn refresh(&self) {
        *self.values.borrow_mut() = read_document(&self.path);
    }

    /// Returns all stored keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }

    fn write_document(&self) -> Result<(), StoreError> {
        let document = StoreFile::new(&self.values.borrow());
        let content = serde_json::to_string_pretty(&document).map_err(StoreError::Serialize)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::Write)?;
            }
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., settings.json -> settings.json.tmp, not settings.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));

        std::fs::write(&temp_path, content).map_err(StoreError::Write)?;

        // Atomic rename (on most filesystems)
        std::fs::rename(&temp_path, &self.path).map_err(StoreError::Write)?;

        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn load(&self, key: &str) -> LoadResult {
        match self.values.borrow().get(key) {
            None => LoadResult::NotFound,
            Some(raw) => from_json(raw).map_or_else(
                || LoadResult::Corrupted {
                    reason: format!("unsupported JSON value `{raw}`"),
                },
                LoadResult::Loaded,
            ),
        }
    }

    /// Stores the value and rewrites the file.
    ///
    /// The in-memory copy is updated even when the write fails, so the
    /// running process keeps seeing the new value.
    fn save(&self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        let raw = serde_json::to_value(&value).map_err(StoreError::Serialize)?;
        self.values.borrow_mut().insert(key.to_string(), raw);
        self.write_document()
    }
}

/// Reads the document at `path`, degrading to an empty map on any problem.
fn read_document(path: &Path) -> BTreeMap<String, Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, starting empty", path.display());
            return BTreeMap::new();
        }
        Err(e) => {
            tracing::warn!(
                "Failed to read settings file {} ({e}), will overwrite on next save",
                path.display()
            );
            return BTreeMap::new();
        }
    };

    match serde_json::from_str::<StoreFile>(&content) {
        Ok(document) if document.version == STORE_FILE_VERSION => document.values,
        Ok(document) => {
            tracing::warn!(
                "Incompatible settings file version: expected {STORE_FILE_VERSION}, got {}; \
                 will overwrite on next save",
                document.version
            );
            BTreeMap::new()
        }
        Err(e) => {
            tracing::warn!(
                "Settings file {} is not valid JSON ({e}), will overwrite on next save",
                path.display()
            );
            BTreeMap::new()
        }
    }
}

/// Maps a JSON scalar onto a [`StoreValue`]; non-scalars are rejected.
fn from_json(raw: &Value) -> Option<StoreValue> {
    match raw {
        Value::Bool(v) => Some(StoreValue::Bool(*v)),
        Value::Number(n) => n
            .as_i64()
            .map(StoreValue::Int)
            .or_else(|| n.as_f64().map(StoreValue::Float)),
        Value::String(s) => Some(StoreValue::Str(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
