#![forbid(unsafe_code)]

//! One-shot completion slots for single-threaded callbacks.
//!
//! [`completion`] returns a [`Completion`] for the producer (for example an
//! item view running a selection animation) and a [`Pending`] for the
//! consumer, which polls it from its own tick. Resolution never calls back
//! into the consumer, so there is no re-entrancy between the two sides.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
enum SlotState<T> {
    Waiting,
    Ready(T),
    Taken,
}

/// Producer half: resolve exactly once.
pub struct Completion<T> {
    slot: Rc<RefCell<SlotState<T>>>,
}

/// Consumer half: poll for the resolved value.
pub struct Pending<T> {
    slot: Rc<RefCell<SlotState<T>>>,
}

/// Create a connected completion/pending pair.
#[must_use]
pub fn completion<T>() -> (Completion<T>, Pending<T>) {
    let slot = Rc::new(RefCell::new(SlotState::Waiting));
    (
        Completion {
            slot: Rc::clone(&slot),
        },
        Pending { slot },
    )
}

impl<T> Completion<T> {
    /// Resolve the pending side. Consumes the completion.
    pub fn complete(self, value: T) {
        let mut slot = self.slot.borrow_mut();
        if matches!(*slot, SlotState::Waiting) {
            *slot = SlotState::Ready(value);
        }
    }

    /// Whether the consumer has gone away.
    pub fn is_abandoned(&self) -> bool {
        Rc::strong_count(&self.slot) == 1
    }
}

impl Completion<()> {
    /// Resolve a unit completion.
    pub fn done(self) {
        self.complete(());
    }
}

impl<T> Pending<T> {
    /// Take the value if it has been resolved. Returns `None` before
    /// resolution and after the value was taken.
    pub fn try_take(&self) -> Option<T> {
        let mut slot = self.slot.borrow_mut();
        match std::mem::replace(&mut *slot, SlotState::Taken) {
            SlotState::Ready(value) => Some(value),
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Whether a value is waiting to be taken.
    pub fn is_ready(&self) -> bool {
        matches!(*self.slot.borrow(), SlotState::Ready(_))
    }

    /// Whether the producer dropped without resolving.
    pub fn is_orphaned(&self) -> bool {
        Rc::strong_count(&self.slot) == 1 && matches!(*self.slot.borrow(), SlotState::Waiting)
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

impl<T> fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("ready", &self.is_ready())
            .finish()
    }
}
