#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and gesture recognition.
//!
//! # Role in popmenu
//! `popmenu-core` is the input layer. It owns the logical-point geometry
//! types every other crate speaks, the canonical [`event::PointerEvent`], and
//! the press/tap [`gesture::GestureRecognizer`] with its explicit
//! simultaneous-recognition policy.
//!
//! # How it fits in the system
//! `popmenu-outline` builds silhouettes from these geometry types,
//! `popmenu-runtime` schedules work against `web_time::Instant`, and
//! `popmenu-widgets` feeds pointer events through the recognizer to drive
//! menu triggers.

pub mod event;
pub mod geometry;
pub mod gesture;

pub use web_time::{Duration, Instant};
