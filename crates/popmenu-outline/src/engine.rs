#![forbid(unsafe_code)]

//! Fused trigger/panel silhouettes.
//!
//! [`compute_outline`] builds the single shape that makes a popup panel look
//! like it grows out of its trigger. The shape is the union of three
//! subpaths that only share edges:
//!
//! 1. the trigger's rounded rect, rounded on the edge facing away from the
//!    panel;
//! 2. the **collar**, a band one corner radius tall bridging the trigger edge
//!    and the panel edge, with concave fillets where it flares out;
//! 3. the panel's rounded rect, always rounded on its far edge.
//!
//! Because the subpaths never overlap, the non-zero fill of their
//! concatenation is the union. No boolean path operation is involved.
//!
//! ```text
//!   center/bottom           right/bottom            left/bottom
//!      .----.                .----.                      .----.
//!      |    |                |    |                      |    |
//!   .-'      '-.             |    '-.                 .-'     |
//!   |          |             |      |                 |       |
//!   '----------'             '------'                 '-------'
//! ```
//!
//! # Invariants
//!
//! 1. The result is closed and has exactly three subpaths.
//! 2. Identical inputs give identical paths.
//! 3. The panel rect's far-edge corners are always rounded.

use std::f64::consts::{FRAC_PI_2, PI};

use popmenu_core::geometry::{Point, Rect};

use crate::path::OutlinePath;
use crate::rounded_rect::{Corners, rounded_rect};

/// Horizontal placement of the panel relative to its trigger.
///
/// The name describes where the panel's content sits: `Right` grows the
/// panel to the right of the trigger's left edge, `Left` grows it to the left
/// of the trigger's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    Left,
    Center,
    #[default]
    Right,
}

/// Vertical placement of the panel relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// The panel hangs below the trigger.
    #[default]
    Bottom,
    /// The panel rises above the trigger.
    Top,
}

/// Alignment pair fixed for the lifetime of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignment {
    #[must_use]
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// All six alignment combinations.
    pub const ALL: [Alignment; 6] = [
        Alignment::new(HorizontalAlignment::Center, VerticalAlignment::Bottom),
        Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Bottom),
        Alignment::new(HorizontalAlignment::Left, VerticalAlignment::Bottom),
        Alignment::new(HorizontalAlignment::Center, VerticalAlignment::Top),
        Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Top),
        Alignment::new(HorizontalAlignment::Left, VerticalAlignment::Top),
    ];
}

/// The three pieces of a fused silhouette, kept apart for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineParts {
    /// Trigger rectangle positioned inside the panel bounds.
    pub trigger_rect: Rect,
    /// Panel-side rectangle.
    pub panel_rect: Rect,
    pub trigger: OutlinePath,
    pub collar: OutlinePath,
    pub panel: OutlinePath,
}

impl OutlineParts {
    /// Concatenate the subpaths into one outline.
    pub fn combined(&self) -> OutlinePath {
        let mut path = self.trigger.clone();
        path.append(&self.collar);
        path.append(&self.panel);
        path
    }
}

/// Corners rounded on the trigger-side rect: the edge away from the panel.
pub fn trigger_corners(vertical: VerticalAlignment) -> Corners {
    match vertical {
        VerticalAlignment::Bottom => Corners::TOP,
        VerticalAlignment::Top => Corners::BOTTOM,
    }
}

/// Corners rounded on the panel-side rect.
///
/// The far edge is always rounded. On the near edge only the corner not
/// covered by the trigger's straight collar side is rounded.
pub fn panel_corners(alignment: Alignment) -> Corners {
    use HorizontalAlignment as H;
    use VerticalAlignment as V;

    match (alignment.horizontal, alignment.vertical) {
        (H::Center, _) => Corners::ALL,
        (H::Right, V::Bottom) => Corners::TOP_RIGHT | Corners::BOTTOM,
        (H::Left, V::Bottom) => Corners::TOP_LEFT | Corners::BOTTOM,
        (H::Right, V::Top) => Corners::BOTTOM_RIGHT | Corners::TOP,
        (H::Left, V::Top) => Corners::BOTTOM_LEFT | Corners::TOP,
    }
}

/// Position a trigger of `trigger` size inside `panel` bounds.
pub fn place_trigger(trigger: Rect, panel: Rect, alignment: Alignment) -> Rect {
    let dx = match alignment.horizontal {
        HorizontalAlignment::Center => panel.width / 2.0 - trigger.width / 2.0,
        HorizontalAlignment::Right => 0.0,
        HorizontalAlignment::Left => panel.width - trigger.width,
    };
    let dy = match alignment.vertical {
        VerticalAlignment::Bottom => 0.0,
        VerticalAlignment::Top => panel.height - trigger.height,
    };
    Rect::new(panel.x + dx, panel.y + dy, trigger.width, trigger.height)
}

/// Build the collar subpath for a positioned trigger rect.
fn collar(t: Rect, alignment: Alignment, r: f64) -> OutlinePath {
    use HorizontalAlignment as H;
    use VerticalAlignment as V;

    let mut path = OutlinePath::new();
    match alignment.vertical {
        V::Bottom => {
            let edge = t.max_y();
            let far = edge + r;
            path.move_to(Point::new(t.min_x(), edge));
            path.line_to(Point::new(t.max_x(), edge));
            match alignment.horizontal {
                H::Center | H::Right => {
                    path.arc(Point::new(t.max_x() + r, edge), r, PI, FRAC_PI_2, false);
                }
                H::Left => {
                    path.line_to(Point::new(t.max_x(), far));
                }
            }
            match alignment.horizontal {
                H::Center | H::Left => {
                    path.line_to(Point::new(t.min_x() - r, far));
                    path.arc(Point::new(t.min_x() - r, edge), r, FRAC_PI_2, 0.0, false);
                }
                H::Right => {
                    path.line_to(Point::new(t.min_x(), far));
                }
            }
        }
        V::Top => {
            let edge = t.min_y();
            let far = edge - r;
            path.move_to(Point::new(t.min_x(), edge));
            path.line_to(Point::new(t.max_x(), edge));
            match alignment.horizontal {
                H::Center | H::Right => {
                    path.arc(Point::new(t.max_x() + r, edge), r, PI, 1.5 * PI, true);
                }
                H::Left => {
                    path.line_to(Point::new(t.max_x(), far));
                }
            }
            match alignment.horizontal {
                H::Center | H::Left => {
                    path.line_to(Point::new(t.min_x() - r, far));
                    path.arc(Point::new(t.min_x() - r, edge), r, 1.5 * PI, 0.0, true);
                }
                H::Right => {
                    path.line_to(Point::new(t.min_x(), far));
                }
            }
        }
    }
    path.close();
    path
}

/// Compute the three subpaths of the fused silhouette.
///
/// `trigger_bounds` supplies the trigger's size; it is re-positioned inside
/// `panel_bounds` according to `alignment`. `panel_bounds` covers both the
/// trigger and the panel, with its height already clamped by layout.
pub fn compute_outline_parts(
    trigger_bounds: Rect,
    panel_bounds: Rect,
    alignment: Alignment,
    corner_radius: f64,
) -> OutlineParts {
    let r = corner_radius.max(0.0);
    let t = place_trigger(trigger_bounds, panel_bounds, alignment);

    let trigger = rounded_rect(t, trigger_corners(alignment.vertical), r);
    let collar = collar(t, alignment, r);

    let panel_rect = match alignment.vertical {
        VerticalAlignment::Bottom => {
            let top = t.max_y() + r;
            Rect::new(
                panel_bounds.x,
                top,
                panel_bounds.width,
                (panel_bounds.max_y() - top).max(0.0),
            )
        }
        VerticalAlignment::Top => Rect::new(
            panel_bounds.x,
            panel_bounds.y,
            panel_bounds.width,
            (panel_bounds.height - (t.height + r)).max(0.0),
        ),
    };
    let panel = rounded_rect(panel_rect, panel_corners(alignment), r);

    OutlineParts {
        trigger_rect: t,
        panel_rect,
        trigger,
        collar,
        panel,
    }
}

/// Compute the fused trigger/panel outline.
pub fn compute_outline(
    trigger_bounds: Rect,
    panel_bounds: Rect,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
    corner_radius: f64,
) -> OutlinePath {
    compute_outline_parts(
        trigger_bounds,
        panel_bounds,
        Alignment::new(horizontal, vertical),
        corner_radius,
    )
    .combined()
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = 8.0;

    fn trigger() -> Rect {
        Rect::from_size(60.0, 40.0)
    }

    fn panel() -> Rect {
        Rect::from_size(160.0, 240.0)
    }

    #[test]
    fn trigger_placement_per_alignment() {
        let t = trigger();
        let p = panel();
        let right_bottom = Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        assert_eq!(place_trigger(t, p, right_bottom), Rect::new(0.0, 0.0, 60.0, 40.0));

        let left_top = Alignment::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        assert_eq!(place_trigger(t, p, left_top), Rect::new(100.0, 200.0, 60.0, 40.0));

        let center_bottom = Alignment::new(HorizontalAlignment::Center, VerticalAlignment::Bottom);
        assert_eq!(place_trigger(t, p, center_bottom), Rect::new(50.0, 0.0, 60.0, 40.0));
    }

    #[test]
    fn every_case_has_three_closed_subpaths() {
        for alignment in Alignment::ALL {
            let parts = compute_outline_parts(trigger(), panel(), alignment, R);
            let path = parts.combined();
            assert!(path.is_closed(), "{alignment:?}");
            assert_eq!(path.subpath_count(), 3, "{alignment:?}");
        }
    }

    #[test]
    fn bottom_panel_rect_starts_below_collar() {
        let alignment = Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        let parts = compute_outline_parts(trigger(), panel(), alignment, R);
        assert_eq!(parts.panel_rect, Rect::new(0.0, 48.0, 160.0, 192.0));
    }

    #[test]
    fn top_panel_rect_ends_above_collar() {
        let alignment = Alignment::new(HorizontalAlignment::Left, VerticalAlignment::Top);
        let parts = compute_outline_parts(trigger(), panel(), alignment, R);
        assert_eq!(parts.panel_rect, Rect::new(0.0, 0.0, 160.0, 192.0));
    }

    #[test]
    fn center_collar_flares_on_both_sides() {
        let alignment = Alignment::new(HorizontalAlignment::Center, VerticalAlignment::Bottom);
        let parts = compute_outline_parts(trigger(), panel(), alignment, R);
        let b = parts.collar.bounding_box().expect("collar");
        assert!((b.min_x() - (50.0 - R)).abs() < 1e-6);
        assert!((b.max_x() - (110.0 + R)).abs() < 1e-6);
        assert!((b.min_y() - 40.0).abs() < 1e-6);
        assert!((b.max_y() - 48.0).abs() < 1e-6);
    }

    #[test]
    fn right_collar_is_straight_on_the_left() {
        let alignment = Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        let parts = compute_outline_parts(trigger(), panel(), alignment, R);
        let b = parts.collar.bounding_box().expect("collar");
        assert!((b.min_x() - 0.0).abs() < 1e-6);
        assert!((b.max_x() - (60.0 + R)).abs() < 1e-6);
        // Straight edge: the point hugging the left side is filled.
        assert!(parts.collar.contains(Point::new(0.5, 47.5)));
        // Concave fillet: the flare's outer corner is empty.
        assert!(!parts.collar.contains(Point::new(67.5, 40.5)));
    }

    #[test]
    fn panel_corner_table() {
        use HorizontalAlignment as H;
        use VerticalAlignment as V;
        let c = |h, v| panel_corners(Alignment::new(h, v));
        assert_eq!(c(H::Center, V::Bottom), Corners::ALL);
        assert_eq!(
            c(H::Right, V::Bottom),
            Corners::TOP_RIGHT | Corners::BOTTOM_LEFT | Corners::BOTTOM_RIGHT
        );
        assert_eq!(
            c(H::Left, V::Top),
            Corners::BOTTOM_LEFT | Corners::TOP_LEFT | Corners::TOP_RIGHT
        );
        assert_eq!(trigger_corners(V::Bottom), Corners::TOP);
        assert_eq!(trigger_corners(V::Top), Corners::BOTTOM);
    }

    #[test]
    fn outline_is_idempotent() {
        for alignment in Alignment::ALL {
            let a = compute_outline(
                trigger(),
                panel(),
                alignment.horizontal,
                alignment.vertical,
                R,
            );
            let b = compute_outline(
                trigger(),
                panel(),
                alignment.horizontal,
                alignment.vertical,
                R,
            );
            assert_eq!(a, b);
        }
    }
}
