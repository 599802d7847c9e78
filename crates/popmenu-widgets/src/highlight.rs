#![forbid(unsafe_code)]

//! Pointer-to-row highlight tracking.
//!
//! The pointer arrives in panel space except for its `y`, which is relative
//! to the trigger. For bottom-aligned panels the two agree. For top-aligned
//! panels the scroll container sits above the trigger, so a drag upward
//! produces a negative `y`; adding the scroll container height maps it back
//! into panel space.
//!
//! # Invariants
//!
//! 1. Every row receives `set_highlighted` and `set_highlight_position` on
//!    each update.
//! 2. At most one row is highlighted.
//! 3. `changed` is true only when the hit moves to a new `Some(index)`, so
//!    a host can emit one haptic tick per transition.

use popmenu_core::geometry::Point;

use crate::item::MenuItemView;
use crate::layout::PanelLayout;

/// Outcome of one highlight pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightUpdate {
    pub highlighted: Option<usize>,
    /// Pointer in each row's local space, in row order.
    pub local_positions: Vec<Point>,
    pub changed: bool,
}

/// Remembers the last hit so transitions can be detected.
#[derive(Debug, Clone, Default)]
pub struct HighlightTracker {
    last: Option<usize>,
}

impl HighlightTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Row highlighted by the last update.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Recompute the highlight for `pointer` and push it into every row.
    ///
    /// `None` clears all highlights.
    pub fn update(
        &mut self,
        pointer: Option<Point>,
        views: &mut [Box<dyn MenuItemView>],
        layout: &PanelLayout,
        scroll_offset: f64,
    ) -> HighlightUpdate {
        let Some(pointer) = pointer else {
            for view in views.iter_mut() {
                view.set_highlighted(false);
                view.set_highlight_position(Point::INFINITY);
            }
            self.last = None;
            return HighlightUpdate {
                highlighted: None,
                local_positions: vec![Point::INFINITY; views.len()],
                changed: false,
            };
        };

        let p = wrap_pointer(pointer, layout);
        let mut highlighted = None;
        let mut local_positions = Vec::with_capacity(views.len());

        for (index, view) in views.iter_mut().enumerate() {
            let Some(frame) = layout.item_frame_in_panel(index, scroll_offset) else {
                break;
            };
            let local = frame.to_local(p);
            let hit = highlighted.is_none() && view.contains(local, frame.size());
            if hit {
                highlighted = Some(index);
            }
            view.set_highlighted(hit);
            view.set_highlight_position(local);
            local_positions.push(local);
        }

        let changed = highlighted.is_some() && highlighted != self.last;
        self.last = highlighted;
        if changed {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "panel.highlight", index = ?highlighted);
        }

        HighlightUpdate {
            highlighted,
            local_positions,
            changed,
        }
    }
}

/// Map a trigger-relative `y` into panel space.
#[must_use]
pub fn wrap_pointer(pointer: Point, layout: &PanelLayout) -> Point {
    if pointer.y < 0.0 {
        Point::new(pointer.x, pointer.y + layout.scroll_container.height)
    } else {
        pointer
    }
}

/// Row under `point` (panel space) and the point in that row's space.
#[must_use]
pub fn hit_test(
    views: &[Box<dyn MenuItemView>],
    layout: &PanelLayout,
    scroll_offset: f64,
    point: Point,
) -> Option<(usize, Point)> {
    views.iter().enumerate().find_map(|(index, view)| {
        let frame = layout.item_frame_in_panel(index, scroll_offset)?;
        let local = frame.to_local(point);
        view.contains(local, frame.size()).then_some((index, local))
    })
}
