//! Tests for key binding entries.

use crate::entry::test_fixtures::{memory_context, recorder};
use crate::entry::{EntryError, EntryInfo, KeyCodeEntry, SetOutcome, SettingsContext};
use crate::keycode::KeyCode;
use crate::store::StoreValue;

fn toggle_key(ctx: &SettingsContext) -> KeyCodeEntry {
    KeyCodeEntry::new(ctx, EntryInfo::new("ToggleKey"), KeyCode::F9).unwrap()
}

#[test]
fn reserved_default_is_rejected() {
    let (_, ctx) = memory_context("App");

    for code in [KeyCode::NONE, KeyCode::ESCAPE, KeyCode::MOUSE0, KeyCode::MOUSE1] {
        let result = KeyCodeEntry::new(&ctx, EntryInfo::new("Bad"), code);
        assert!(matches!(result, Err(EntryError::InvalidDefault { .. })), "{code}");
    }
}

#[test]
fn primary_pointer_buttons_are_rejected_by_set() {
    let (_, ctx) = memory_context("App");
    let entry = toggle_key(&ctx);
    let (events, handler) = recorder();
    entry.subscribe(handler);

    assert_eq!(entry.set(KeyCode::MOUSE0), SetOutcome::Rejected);
    assert_eq!(entry.set(KeyCode::MOUSE1), SetOutcome::Rejected);

    assert_eq!(entry.get(), KeyCode::F9);
    assert!(events.borrow().is_empty());
}

#[test]
fn other_pointer_buttons_are_accepted() {
    let (_, ctx) = memory_context("App");
    let entry = toggle_key(&ctx);

    assert_eq!(entry.set(KeyCode::MOUSE3), SetOutcome::Changed);
    assert_eq!(entry.label(), "Mouse 3");
}

#[test]
fn stored_primary_pointer_button_coerces_to_default() {
    let (store, ctx) = memory_context("App");
    store.seed("App_ToggleKey", KeyCode::MOUSE0.value());
    store.seed("App_ToggleKey_Version", 1);

    let entry = toggle_key(&ctx);

    assert_eq!(entry.get(), KeyCode::F9);
    assert_eq!(
        store.value("App_ToggleKey"),
        Some(StoreValue::Int(i64::from(KeyCode::F9.value())))
    );
}

#[test]
fn stored_unknown_code_coerces_to_default() {
    let (store, ctx) = memory_context("App");
    store.seed("App_ToggleKey", 9999);
    store.seed("App_ToggleKey_Version", 1);

    assert_eq!(toggle_key(&ctx).get(), KeyCode::F9);
}

#[test]
fn stored_bindable_code_loads_unchanged() {
    let (store, ctx) = memory_context("App");
    store.seed("App_ToggleKey", KeyCode::KEYPAD5.value());
    store.seed("App_ToggleKey_Version", 1);

    let entry = toggle_key(&ctx);

    assert_eq!(entry.get(), KeyCode::KEYPAD5);
    assert_eq!(entry.label(), "Num 5");
}
