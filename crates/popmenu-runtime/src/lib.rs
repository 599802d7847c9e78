#![forbid(unsafe_code)]

//! Runtime: single-threaded cooperative primitives.
//!
//! # Role in popmenu
//! Nothing in popmenu owns a thread or an event loop. The host calls
//! `tick(now)` and every time-dependent piece polls against that instant.
//! This crate supplies the pieces those ticks drive:
//!
//! - [`RepeatingTask`] / [`TaskSlot`]: a cancellable fixed-period deadline
//!   (edge autoscroll).
//! - [`completion`]: a one-shot [`Completion`] / [`Pending`] pair
//!   (selection animations).
//! - [`Fade`]: a linear opacity animation whose completion always runs.
//! - [`PresentationBus`]: the shared "only one menu open" registry.
//!
//! Everything here is `!Send`; state is shared with `Rc` and `RefCell`.

pub mod bus;
pub mod completion;
pub mod fade;
pub mod repeating;

pub use bus::{PresentationBus, Subscription, TriggerId};
pub use completion::{Completion, Pending, completion};
pub use fade::Fade;
pub use repeating::{RepeatingTask, TaskSlot};
