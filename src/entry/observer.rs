//! Change observers owned by each entry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`SettingsEntry::subscribe`](super::SettingsEntry::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Rc<dyn Fn(&T, &T)>;

/// Ordered list of `(old, new)` change handlers.
pub(super) struct Observers<T> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Observers<T> {
    pub(super) fn subscribe(&self, handler: impl Fn(&T, &T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    pub(super) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Invokes every handler once, in subscription order.
    ///
    /// Handlers run against a snapshot of the list, with no borrow held, so
    /// they may subscribe, unsubscribe or mutate the entry. Changes to the
    /// list take effect from the next notification.
    pub(super) fn notify(&self, old: &T, new: &T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in snapshot {
            handler(old, new);
        }
    }
}
