#![forbid(unsafe_code)]

//! Canonical pointer events.
//!
//! A host translates its touch or mouse input into [`PointerEvent`]s expressed
//! in the receiving control's local coordinate space. Every event carries the
//! instant it happened so recognizers never read the wall clock themselves.

use web_time::Instant;

use crate::geometry::Point;

/// Phase of a single-pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The pointer touched down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer lifted.
    Up,
    /// The host cancelled the interaction (e.g. the system took over the touch).
    Cancel,
}

/// A pointer event in control-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub time: Instant,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(phase: PointerPhase, position: Point, time: Instant) -> Self {
        Self {
            phase,
            position,
            time,
        }
    }

    #[must_use]
    pub const fn down(position: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Down, position, time)
    }

    #[must_use]
    pub const fn moved(position: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Move, position, time)
    }

    #[must_use]
    pub const fn up(position: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Up, position, time)
    }

    #[must_use]
    pub const fn cancel(position: Point, time: Instant) -> Self {
        Self::new(PointerPhase::Cancel, position, time)
    }

    /// Whether this event ends the interaction.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}
