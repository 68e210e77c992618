// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop notifications and a per-element observer list.
//!
//! A committed drop is published on the target element. [`DropBus::publish`] delivers it to
//! every listener registered on the target, then to every listener registered on the subject,
//! so a subject's owner can observe its own drops without knowing the target in advance.
//!
//! The bus is single-threaded and re-entrancy safe: listeners may subscribe or unsubscribe
//! while a notification is being delivered. Changes take effect from the next publish.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Payload of a committed drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropNotification<E> {
    /// The element that was dragged.
    pub subject: E,
    /// The element the subject was appended to.
    pub target: E,
    /// Selector of `target`, computed when the drop was committed.
    pub target_selector: String,
}

/// Handle returned by [`DropBus::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Rc<RefCell<dyn FnMut(&DropNotification<E>)>>;

struct Listener<E> {
    id: SubscriptionId,
    element: E,
    callback: Callback<E>,
}

/// Observer list keyed by element.
pub struct DropBus<E> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener<E>>>,
}

impl<E> core::fmt::Debug for DropBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropBus")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<E> Default for DropBus<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<E: Copy + Eq + 'static> DropBus<E> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for drops that involve `element` as target or subject.
    pub fn subscribe(
        &self,
        element: E,
        callback: impl FnMut(&DropNotification<E>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            element,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    /// Number of listeners registered on `element`.
    pub fn listener_count(&self, element: E) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.element == element)
            .count()
    }

    /// Deliver `notification` to the target's listeners, then the subject's.
    ///
    /// Returns the number of callbacks invoked. A callback that is already running (a listener
    /// that publishes from inside itself) is skipped for the nested delivery.
    pub fn publish(&self, notification: &DropNotification<E>) -> usize {
        let snapshot: Vec<Callback<E>> = {
            let listeners = self.listeners.borrow();
            let on_target = listeners.iter().filter(|l| l.element == notification.target);
            let on_subject = listeners.iter().filter(|l| l.element == notification.subject);
            on_target
                .chain(on_subject)
                .map(|l| l.callback.clone())
                .collect()
        };
        let mut delivered = 0;
        for callback in snapshot {
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)(notification);
                delivered += 1;
            }
        }
        delivered
    }
}
