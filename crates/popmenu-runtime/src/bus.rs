#![forbid(unsafe_code)]

//! Presentation bus: "only one menu open" coordination across triggers.
//!
//! Every trigger allocates a [`TriggerId`] and subscribes a listener. Before
//! a trigger shows its panel it calls [`PresentationBus::will_present`],
//! which synchronously invokes every other live listener so they can close
//! their panels, then records the sender as the active presenter.
//!
//! # Design
//!
//! Listeners are held as `Weak` references; the [`Subscription`] guard owns
//! the strong side. Dropping the guard unsubscribes, so a trigger's listener
//! can never outlive the trigger. Dead entries are pruned lazily during
//! delivery and eagerly on drop when the bus is not borrowed.
//!
//! # Invariants
//!
//! 1. At most one trigger is active at a time.
//! 2. `will_present(sender)` never calls the sender's own listener.
//! 3. Listeners run after the bus borrow is released, so a listener may
//!    query the bus (or drop its own subscription) without panicking.
//! 4. A listener whose guard was dropped is never called again.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type ListenerRc = Rc<dyn Fn(TriggerId)>;
type ListenerWeak = Weak<dyn Fn(TriggerId)>;

/// Identity of one trigger on a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(u64);

impl TriggerId {
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

struct BusInner {
    next_id: u64,
    listeners: Vec<(TriggerId, ListenerWeak)>,
    active: Option<TriggerId>,
}

impl BusInner {
    fn prune(&mut self) {
        self.listeners.retain(|(_, w)| w.strong_count() > 0);
    }
}

/// Shared single-active-menu registry.
///
/// Cloning a bus creates another handle to the same registry.
#[derive(Clone)]
pub struct PresentationBus {
    inner: Rc<RefCell<BusInner>>,
}

impl Default for PresentationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PresentationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PresentationBus")
            .field("active", &inner.active)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl PresentationBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                next_id: 1,
                listeners: Vec::new(),
                active: None,
            })),
        }
    }

    /// Hand out a fresh trigger identity.
    pub fn allocate_id(&self) -> TriggerId {
        let mut inner = self.inner.borrow_mut();
        let id = TriggerId(inner.next_id);
        inner.next_id += 1;
        id
    }

    /// Register `listener` for "another trigger will present" notices.
    ///
    /// The listener receives the presenting trigger's id. Dropping the
    /// returned guard unsubscribes.
    pub fn subscribe(&self, id: TriggerId, listener: impl Fn(TriggerId) + 'static) -> Subscription {
        let strong: ListenerRc = Rc::new(listener);
        let mut inner = self.inner.borrow_mut();
        inner.prune();
        inner.listeners.push((id, Rc::downgrade(&strong)));
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "bus.subscribe", trigger = id.raw());
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
            listener: strong,
        }
    }

    /// Announce that `sender` is about to show its panel.
    ///
    /// Every other live listener runs synchronously before this returns.
    pub fn will_present(&self, sender: TriggerId) {
        let listeners: Vec<ListenerWeak> = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            inner
                .listeners
                .iter()
                .filter(|(id, _)| *id != sender)
                .map(|(_, w)| w.clone())
                .collect()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "bus.will_present",
            sender = sender.raw(),
            notified = listeners.len()
        );
        // Upgrade at call time so a guard dropped by an earlier listener
        // suppresses its own call.
        for listener in listeners.iter().filter_map(Weak::upgrade) {
            listener(sender);
        }
        self.inner.borrow_mut().active = Some(sender);
    }

    /// Record that `id` closed its panel. Ignored unless `id` is active.
    pub fn dismissed(&self, id: TriggerId) {
        let mut inner = self.inner.borrow_mut();
        if inner.active == Some(id) {
            inner.active = None;
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "bus.dismissed", trigger = id.raw());
        }
    }

    /// The trigger currently presenting, if any.
    #[must_use]
    pub fn active(&self) -> Option<TriggerId> {
        self.inner.borrow().active
    }

    /// Number of registered listeners, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// RAII guard for a bus listener.
pub struct Subscription {
    id: TriggerId,
    bus: Weak<RefCell<BusInner>>,
    listener: ListenerRc,
}

impl Subscription {
    #[inline]
    #[must_use]
    pub fn id(&self) -> TriggerId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        // Delivery may be in progress; lazy pruning covers that case.
        if let Ok(mut inner) = bus.try_borrow_mut() {
            let id = self.id;
            let listener = Rc::as_ptr(&self.listener);
            inner
                .listeners
                .retain(|(i, w)| !(*i == id && std::ptr::addr_eq(w.as_ptr(), listener)));
            if inner.active == Some(id) {
                inner.active = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn ids_are_unique() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn will_present_skips_sender() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        let a_calls = Rc::new(Cell::new(0));
        let b_calls = Rc::new(Cell::new(0));
        let (ac, bc) = (Rc::clone(&a_calls), Rc::clone(&b_calls));
        let _sa = bus.subscribe(a, move |_| ac.set(ac.get() + 1));
        let _sb = bus.subscribe(b, move |sender| {
            assert_eq!(sender.raw(), 1);
            bc.set(bc.get() + 1);
        });

        bus.will_present(a);
        assert_eq!(a_calls.get(), 0);
        assert_eq!(b_calls.get(), 1);
        assert_eq!(bus.active(), Some(a));
    }

    #[test]
    fn dropped_subscription_is_not_called() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let sub = bus.subscribe(b, move |_| c.set(c.get() + 1));
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        bus.will_present(a);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dismissed_only_clears_the_active_trigger() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        bus.will_present(a);
        bus.dismissed(b);
        assert_eq!(bus.active(), Some(a));
        bus.dismissed(a);
        assert_eq!(bus.active(), None);
    }

    #[test]
    fn listener_may_query_the_bus() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let b = bus.allocate_id();
        let seen = Rc::new(Cell::new(None));
        let (handle, s) = (bus.clone(), Rc::clone(&seen));
        let _sb = bus.subscribe(b, move |_| s.set(Some(handle.subscriber_count())));
        bus.will_present(a);
        assert_eq!(seen.get(), Some(1));
    }

    #[test]
    fn dropping_active_subscription_clears_active() {
        let bus = PresentationBus::new();
        let a = bus.allocate_id();
        let sub = bus.subscribe(a, |_| {});
        bus.will_present(a);
        drop(sub);
        assert_eq!(bus.active(), None);
    }
}
