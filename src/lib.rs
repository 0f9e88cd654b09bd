//! Settings Entry: typed, persisted, self-migrating settings
//!
//! A library for declaring individual application settings that load
//! lazily from a key-value store, validate and correct their stored data,
//! adopt new defaults when their version advances, and notify observers
//! when they change.

pub mod config;
pub mod entry;
pub mod keycode;
pub mod localization;
pub mod store;
