//! Shared test fixtures for entry tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::store::mock::MockStore;

use super::SettingsContext;

/// Recorded `(old, new)` notifications.
pub type Events<T> = Rc<RefCell<Vec<(T, T)>>>;

/// Creates a context over a fresh mock store.
pub fn memory_context(prefix: &str) -> (Rc<MockStore>, SettingsContext) {
    let store = Rc::new(MockStore::new());
    let context = SettingsContext::new(Rc::clone(&store) as _, prefix);
    (store, context)
}

/// Creates a fresh context over an existing store, as after a restart.
pub fn restart(store: &Rc<MockStore>, prefix: &str) -> SettingsContext {
    SettingsContext::new(Rc::clone(store) as _, prefix)
}

/// Returns a handler that records every notification into the returned list.
pub fn recorder<T: Clone + 'static>() -> (Events<T>, impl Fn(&T, &T) + 'static) {
    let events: Events<T> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let handler = move |old: &T, new: &T| sink.borrow_mut().push((old.clone(), new.clone()));
    (events, handler)
}
