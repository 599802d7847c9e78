#![forbid(unsafe_code)]

//! Gesture recognition: turns raw pointer events into press and tap gestures.
//!
//! [`GestureRecognizer`] runs two recognizers over the same pointer sequence:
//!
//! - **Press**: a continuous gesture that begins once the pointer has been
//!   held for `min_press_duration` (immediately when that is zero) and then
//!   reports every move until the pointer lifts or the host cancels.
//! - **Tap**: a discrete gesture that fires on lift when the pointer stayed
//!   within `tap_slop` of where it landed and lifted within
//!   `tap_max_duration`.
//!
//! Whether both may recognise the same sequence is decided by an explicit
//! [`SimultaneousPolicy`] table rather than by implicit arbitration.
//!
//! # Invariants
//!
//! 1. `PressBegan` is emitted at most once per pointer sequence and always
//!    precedes any `PressMoved`, `PressEnded`, or `PressCancelled`.
//! 2. Exactly one of `PressEnded` / `PressCancelled` follows a `PressBegan`.
//! 3. `Tapped` is emitted at most once per sequence, only on lift, and after
//!    `PressEnded` when both fire.
//! 4. When the policy does not allow `(Press, Tap)`, a began press makes the
//!    tap fail.
//! 5. After `reset()`, no sequence is in flight.

use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::event::{PointerEvent, PointerPhase};
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for press and tap recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Hold time before a press begins (default: 0).
    pub min_press_duration: Duration,
    /// Movement allowed before a pending press begins (default: 10).
    pub allowable_movement: f64,
    /// Longest contact that still counts as a tap (default: 500ms).
    pub tap_max_duration: Duration,
    /// Movement allowed for a tap (default: 10).
    pub tap_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_press_duration: Duration::ZERO,
            allowable_movement: 10.0,
            tap_max_duration: Duration::from_millis(500),
            tap_slop: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Simultaneous recognition policy
// ---------------------------------------------------------------------------

/// The recognizers run by [`GestureRecognizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizerKind {
    Press,
    Tap,
}

/// Table of recognizer pairs allowed to recognise the same pointer sequence.
///
/// Pairs are symmetric: allowing `(Press, Tap)` also allows `(Tap, Press)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimultaneousPolicy {
    pairs: SmallVec<[(RecognizerKind, RecognizerKind); 2]>,
}

impl SimultaneousPolicy {
    /// No pair may recognise together; the press wins over the tap.
    #[must_use]
    pub fn exclusive() -> Self {
        Self::default()
    }

    /// Policy used by menu triggers: the press has priority but a quick tap
    /// still fires alongside it.
    #[must_use]
    pub fn press_with_tap() -> Self {
        Self::exclusive().allow(RecognizerKind::Press, RecognizerKind::Tap)
    }

    /// Add a pair to the table.
    #[must_use]
    pub fn allow(mut self, a: RecognizerKind, b: RecognizerKind) -> Self {
        if !self.allows(a, b) {
            self.pairs.push((a, b));
        }
        self
    }

    /// Whether `a` and `b` may both recognise the same sequence.
    pub fn allows(&self, a: RecognizerKind, b: RecognizerKind) -> bool {
        self.pairs
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Recognised gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The press began; `time` is when it was recognised.
    PressBegan { pos: Point, time: Instant },
    /// The pointer moved during a began press.
    PressMoved { pos: Point, time: Instant },
    /// The pointer lifted after a began press.
    PressEnded { pos: Point, time: Instant },
    /// The host cancelled a began press.
    PressCancelled { pos: Point, time: Instant },
    /// A tap was recognised on lift.
    Tapped { pos: Point, time: Instant },
}

impl GestureEvent {
    /// Pointer position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            Self::PressBegan { pos, .. }
            | Self::PressMoved { pos, .. }
            | Self::PressEnded { pos, .. }
            | Self::PressCancelled { pos, .. }
            | Self::Tapped { pos, .. } => pos,
        }
    }
}

/// Output buffer; most events produce zero to two gestures.
pub type GestureEvents = SmallVec<[GestureEvent; 2]>;

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressPhase {
    Possible,
    Began,
    Failed,
}

/// The pointer sequence currently in flight.
#[derive(Debug, Clone)]
struct Contact {
    origin: Point,
    down_at: Instant,
    last: Point,
    press: PressPhase,
    tap_possible: bool,
}

// ---------------------------------------------------------------------------
// GestureRecognizer
// ---------------------------------------------------------------------------

/// Stateful press/tap recognizer for a single pointer.
///
/// Call [`process`](GestureRecognizer::process) for each [`PointerEvent`] and
/// [`check_press`](GestureRecognizer::check_press) on tick so a stationary
/// hold can begin a press without further input.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    policy: SimultaneousPolicy,
    contact: Option<Contact>,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(config: GestureConfig, policy: SimultaneousPolicy) -> Self {
        Self {
            config,
            policy,
            contact: None,
        }
    }

    /// Process a pointer event, returning the gestures it produced.
    pub fn process(&mut self, event: &PointerEvent) -> GestureEvents {
        let mut out = GestureEvents::new();
        match event.phase {
            PointerPhase::Down => self.on_down(event.position, event.time, &mut out),
            PointerPhase::Move => self.on_move(event.position, event.time, &mut out),
            PointerPhase::Up => self.on_up(event.position, event.time, &mut out),
            PointerPhase::Cancel => self.on_cancel(event.position, event.time, &mut out),
        }
        out
    }

    /// Begin a pending press whose hold time has elapsed.
    pub fn check_press(&mut self, now: Instant) -> Option<GestureEvent> {
        let min = self.config.min_press_duration;
        let contact = self.contact.as_mut()?;
        if contact.press != PressPhase::Possible {
            return None;
        }
        if now.saturating_duration_since(contact.down_at) < min {
            return None;
        }
        contact.press = PressPhase::Began;
        if !self.policy.allows(RecognizerKind::Press, RecognizerKind::Tap) {
            contact.tap_possible = false;
        }
        Some(GestureEvent::PressBegan {
            pos: contact.last,
            time: now,
        })
    }

    /// Whether a press has begun and not yet ended.
    #[inline]
    #[must_use]
    pub fn is_pressing(&self) -> bool {
        self.contact
            .as_ref()
            .is_some_and(|c| c.press == PressPhase::Began)
    }

    /// Whether a pointer sequence is in flight.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.contact.is_some()
    }

    /// Drop the in-flight sequence without emitting anything.
    pub fn reset(&mut self) {
        self.contact = None;
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Change the hold time before a press begins. Applies to the next
    /// pointer sequence as well as a pending one.
    pub fn set_min_press_duration(&mut self, duration: Duration) {
        self.config.min_press_duration = duration;
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> &SimultaneousPolicy {
        &self.policy
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureRecognizer {
    fn on_down(&mut self, pos: Point, now: Instant, out: &mut GestureEvents) {
        self.contact = Some(Contact {
            origin: pos,
            down_at: now,
            last: pos,
            press: PressPhase::Possible,
            tap_possible: true,
        });
        out.extend(self.check_press(now));
    }

    fn on_move(&mut self, pos: Point, now: Instant, out: &mut GestureEvents) {
        let Some(contact) = self.contact.as_mut() else {
            return;
        };
        contact.last = pos;
        let travelled = pos.distance(contact.origin);
        if travelled > self.config.tap_slop {
            contact.tap_possible = false;
        }
        if contact.press == PressPhase::Possible && travelled > self.config.allowable_movement {
            contact.press = PressPhase::Failed;
        }

        out.extend(self.check_press(now));

        if self.is_pressing() {
            out.push(GestureEvent::PressMoved { pos, time: now });
        }
    }

    fn on_up(&mut self, pos: Point, now: Instant, out: &mut GestureEvents) {
        if self.contact.is_none() {
            return;
        }
        if let Some(contact) = self.contact.as_mut() {
            contact.last = pos;
            if pos.distance(contact.origin) > self.config.tap_slop {
                contact.tap_possible = false;
            }
        }
        out.extend(self.check_press(now));

        let Some(contact) = self.contact.take() else {
            return;
        };
        if contact.press == PressPhase::Began {
            out.push(GestureEvent::PressEnded { pos, time: now });
        }

        let held = now.saturating_duration_since(contact.down_at);
        if contact.tap_possible && held <= self.config.tap_max_duration {
            out.push(GestureEvent::Tapped { pos, time: now });
        }
    }

    fn on_cancel(&mut self, pos: Point, now: Instant, out: &mut GestureEvents) {
        let began = self
            .contact
            .take()
            .is_some_and(|c| c.press == PressPhase::Began);
        if began {
            out.push(GestureEvent::PressCancelled { pos, time: now });
        }
    }
}
