//! Primitive values understood by every settings store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive value as held by a [`SettingsStore`](super::SettingsStore).
///
/// Serialized untagged, so a JSON store contains plain scalars
/// (`true`, `42`, `0.5`, `"Medium"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
}

impl StoreValue {
    /// Returns a short name for the value's type, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for StoreValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for StoreValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Conversion between an entry's value type and its stored representation.
///
/// `from_store` returns `None` when the stored value has an incompatible
/// type; callers treat that the same as malformed data.
pub trait Persist: Sized {
    /// Human-readable type name used in diagnostics.
    const KIND: &'static str;

    /// Converts the value into its stored form.
    fn to_store(&self) -> StoreValue;

    /// Reads the value back from its stored form.
    fn from_store(value: &StoreValue) -> Option<Self>;
}

impl Persist for bool {
    const KIND: &'static str = "bool";

    fn to_store(&self) -> StoreValue {
        StoreValue::Bool(*self)
    }

    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl Persist for i32 {
    const KIND: &'static str = "int";

    fn to_store(&self) -> StoreValue {
        StoreValue::Int(i64::from(*self))
    }

    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Int(v) => Self::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl Persist for i64 {
    const KIND: &'static str = "int";

    fn to_store(&self) -> StoreValue {
        StoreValue::Int(*self)
    }

    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl Persist for f32 {
    const KIND: &'static str = "float";

    fn to_store(&self) -> StoreValue {
        StoreValue::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Float(v) => Some(*v as Self),
            StoreValue::Int(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl Persist for f64 {
    const KIND: &'static str = "float";

    fn to_store(&self) -> StoreValue {
        StoreValue::Float(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Float(v) => Some(*v),
            StoreValue::Int(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl Persist for String {
    const KIND: &'static str = "string";

    fn to_store(&self) -> StoreValue {
        StoreValue::Str(self.clone())
    }

    fn from_store(value: &StoreValue) -> Option<Self> {
        match value {
            StoreValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}
