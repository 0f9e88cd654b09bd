//! Range-constrained numeric entries.
//!
//! [`FloatEntry`] and [`IntEntry`] share the [`Range`] rule set but differ on
//! load: an out-of-range float is clamped into range, an out-of-range int is
//! rejected and the record resets to its default. Existing stored data
//! depends on that difference.

use std::fmt;

use super::{EntryError, EntryInfo, EntryRules, SetOutcome, SettingsContext, SettingsEntry};
use crate::store::Persist;

/// Numeric types usable as [`Range`] bounds.
pub trait RangeValue: Copy + PartialOrd + fmt::Debug + fmt::Display {
    /// Widens the value for interpolation.
    fn to_f64(self) -> f64;

    /// Narrows an interpolated value; integers round to nearest.
    fn from_f64(value: f64) -> Self;

    /// Returns `false` for bounds that cannot define a range (NaN, infinity).
    fn is_valid_bound(self) -> bool;
}

impl RangeValue for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as Self
    }

    fn is_valid_bound(self) -> bool {
        self.is_finite()
    }
}

impl RangeValue for i32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        // `as` saturates at the type bounds.
        value.round() as Self
    }

    fn is_valid_bound(self) -> bool {
        true
    }
}

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: RangeValue> Range<T> {
    /// Creates a range, or `None` if `min > max` or a bound is not finite.
    #[must_use]
    pub fn new(min: T, max: T) -> Option<Self> {
        (min.is_valid_bound() && max.is_valid_bound() && min <= max).then_some(Self { min, max })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> T {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> T {
        self.max
    }

    /// Returns `true` if `min <= value <= max`. NaN is never contained.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Limits `value` to the bounds. NaN maps to `min`.
    pub fn clamp(&self, value: T) -> T {
        if value > self.max {
            self.max
        } else if value >= self.min {
            value
        } else {
            self.min
        }
    }

    /// Maps `value` linearly onto `[0, 1]`; a zero-width range maps to 0.
    pub fn normalize(&self, value: T) -> f64 {
        let span = self.max.to_f64() - self.min.to_f64();
        if span <= 0.0 {
            return 0.0;
        }
        ((self.clamp(value).to_f64() - self.min.to_f64()) / span).clamp(0.0, 1.0)
    }

    /// Maps `t` in `[0, 1]` back into the range. `t` is clamped first.
    pub fn denormalize(&self, t: f64) -> T {
        let t = t.clamp(0.0, 1.0);
        let min = self.min.to_f64();
        let max = self.max.to_f64();
        self.clamp(T::from_f64((max - min).mul_add(t, min)))
    }
}

impl EntryRules<f32> for Range<f32> {
    fn validate(&self, value: &f32) -> bool {
        self.contains(*value)
    }

    fn coerce(&self, value: f32, _default: &f32) -> f32 {
        self.clamp(value)
    }
}

impl EntryRules<i32> for Range<i32> {
    fn validate(&self, value: &i32) -> bool {
        self.clamp(*value) == *value
    }
}

/// A float setting limited to `[min, max]`; clamps stored values on load.
pub type FloatEntry = SettingsEntry<f32, Range<f32>>;

/// An integer setting limited to `[min, max]`; resets out-of-range stored
/// values to the default on load.
pub type IntEntry = SettingsEntry<i32, Range<i32>>;

fn build<T>(
    context: &SettingsContext,
    info: EntryInfo,
    default: T,
    min: T,
    max: T,
) -> Result<SettingsEntry<T, Range<T>>, EntryError>
where
    T: RangeValue + Persist,
    Range<T>: EntryRules<T>,
{
    let range = Range::new(min, max).ok_or_else(|| EntryError::InvalidRange {
        key: info.local_key().to_string(),
        min: min.to_string(),
        max: max.to_string(),
    })?;
    SettingsEntry::with_rules(context, info, default, range)
}

impl SettingsEntry<f32, Range<f32>> {
    /// Creates a float entry bounded by `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are reversed or not finite, the
    /// default lies outside them, or the key is invalid.
    pub fn new(
        context: &SettingsContext,
        info: EntryInfo,
        default: f32,
        min: f32,
        max: f32,
    ) -> Result<Self, EntryError> {
        build(context, info, default, min, max)
    }
}

impl SettingsEntry<i32, Range<i32>> {
    /// Creates an integer entry bounded by `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max`, the default lies outside the
    /// bounds, or the key is invalid.
    pub fn new(
        context: &SettingsContext,
        info: EntryInfo,
        default: i32,
        min: i32,
        max: i32,
    ) -> Result<Self, EntryError> {
        build(context, info, default, min, max)
    }
}

impl<T> SettingsEntry<T, Range<T>>
where
    T: RangeValue + Persist,
    Range<T>: EntryRules<T>,
{
    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> T {
        self.rules().min()
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> T {
        self.rules().max()
    }

    /// Limits `value` to the entry's bounds.
    #[must_use]
    pub fn clamp(&self, value: T) -> T {
        self.rules().clamp(value)
    }

    /// Returns the value mapped onto `[0, 1]`.
    pub fn normalized(&self) -> f64 {
        self.rules().normalize(self.get())
    }

    /// Sets the value from a position `t` in `[0, 1]`.
    ///
    /// `t` outside the unit interval is clamped; NaN is rejected.
    pub fn set_normalized(&self, t: f64) -> SetOutcome {
        if t.is_nan() {
            return SetOutcome::Rejected;
        }
        self.set(self.rules().denormalize(t))
    }
}
