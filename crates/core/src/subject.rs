//! Synchronous publish/subscribe primitive
//!
//! A [`Subject`] keeps an ordered, duplicate-free list of listeners and fans
//! every emitted event out to them on the calling thread.
//!
//! # Invariants
//!
//! 1. Listeners are notified in registration order.
//! 2. Registering the same listener twice is a no-op (identity set).
//! 3. The list is snapshotted when an emission starts: listeners added or
//!    removed by a listener during that emission do not change who receives it.
//! 4. The subject never keeps a listener alive. Entries whose owner dropped
//!    them are skipped and pruned.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Receiver side of the protocol
pub trait Listener<E> {
    /// Handles one event. Called synchronously by the emitting subject.
    fn process_event(&self, event: &E);
}

/// Sender side of the protocol
pub struct Subject<E> {
    listeners: RefCell<Vec<Weak<dyn Listener<E>>>>,
}

fn same_listener<E>(a: &Weak<dyn Listener<E>>, b: &Weak<dyn Listener<E>>) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}

impl<E> Subject<E> {
    /// Creates a subject with no listeners
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Adds a listener at the end of the notification order
    pub fn register_listener(&self, listener: Rc<dyn Listener<E>>) {
        let weak = Rc::downgrade(&listener);
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.strong_count() > 0);
        if listeners.iter().any(|l| same_listener(l, &weak)) {
            return;
        }
        listeners.push(weak);
    }

    /// Removes a listener; does nothing if it was never registered
    pub fn unregister_listener(&self, listener: &Rc<dyn Listener<E>>) {
        let weak = Rc::downgrade(listener);
        self.listeners
            .borrow_mut()
            .retain(|l| l.strong_count() > 0 && !same_listener(l, &weak));
    }

    /// Returns true if the listener is currently registered
    pub fn is_registered(&self, listener: &Rc<dyn Listener<E>>) -> bool {
        let weak = Rc::downgrade(listener);
        self.listeners
            .borrow()
            .iter()
            .any(|l| l.strong_count() > 0 && same_listener(l, &weak))
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    /// Delivers `event` to every listener registered at this moment
    pub fn emit_event(&self, event: &E) {
        let snapshot: Vec<Rc<dyn Listener<E>>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in snapshot {
            listener.process_event(event);
        }
    }
}

impl<E> Default for Subject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Subject<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
