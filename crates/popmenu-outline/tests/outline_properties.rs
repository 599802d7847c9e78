//! Property-based invariants for fused outlines.
//!
//! For every alignment and any reasonable trigger/panel geometry:
//!
//! 1. The outline is closed and made of exactly three subpaths.
//! 2. The subpaths never overlap: the winding number is -1, 0, or 1 everywhere.
//! 3. The panel's far-edge corners are rounded (the exact corner is outside).
//! 4. The trigger's far-edge corners are rounded.
//! 5. Trigger body, collar middle, and panel body are inside.
//! 6. Determinism: identical inputs produce identical paths.

use popmenu_core::geometry::{Point, Rect};
use popmenu_outline::{
    Alignment, HorizontalAlignment, VerticalAlignment, compute_outline, compute_outline_parts,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Geometry {
    trigger: Rect,
    panel: Rect,
    radius: f64,
}

fn alignment() -> impl Strategy<Value = Alignment> {
    (0usize..6).prop_map(|i| Alignment::ALL[i])
}

fn geometry() -> impl Strategy<Value = Geometry> {
    (20u32..120, 20u32..60, 30u32..200, 30u32..400, 2u32..12).prop_map(
        |(w, h, extra_w, body_h, r)| {
            let (w, h, r) = (f64::from(w), f64::from(h), f64::from(r));
            Geometry {
                trigger: Rect::from_size(w, h),
                panel: Rect::from_size(w + f64::from(extra_w), h + r + f64::from(body_h)),
                radius: r,
            }
        },
    )
}

/// Sample points offset from the integer grid so they never sit on an edge.
fn samples(bounds: Rect) -> impl Iterator<Item = Point> {
    (0..16).flat_map(move |i| {
        (0..16).map(move |j| {
            Point::new(
                bounds.x + bounds.width * (f64::from(i) + 0.37) / 16.0,
                bounds.y + bounds.height * (f64::from(j) + 0.41) / 16.0,
            )
        })
    })
}

// ═════════════════════════════════════════════════════════════════════════
// Structure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn outline_is_three_closed_subpaths(a in alignment(), g in geometry()) {
        let path = compute_outline(g.trigger, g.panel, a.horizontal, a.vertical, g.radius);
        prop_assert!(path.is_closed());
        prop_assert_eq!(path.subpath_count(), 3);
    }

    #[test]
    fn subpaths_never_overlap(a in alignment(), g in geometry()) {
        let path = compute_outline(g.trigger, g.panel, a.horizontal, a.vertical, g.radius);
        for p in samples(g.panel) {
            let w = path.winding(p);
            prop_assert!((-1..=1).contains(&w), "winding {} at {:?}", w, p);
        }
    }

    #[test]
    fn outline_is_deterministic(a in alignment(), g in geometry()) {
        let first = compute_outline(g.trigger, g.panel, a.horizontal, a.vertical, g.radius);
        let second = compute_outline(g.trigger, g.panel, a.horizontal, a.vertical, g.radius);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Corner rounding
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn far_edges_are_rounded(a in alignment(), g in geometry()) {
        let parts = compute_outline_parts(g.trigger, g.panel, a, g.radius);
        let path = parts.combined();
        let nudge = 0.2;

        let (panel_far_y, trigger_far_y) = match a.vertical {
            VerticalAlignment::Bottom => (parts.panel_rect.max_y() - nudge, parts.trigger_rect.min_y() + nudge),
            VerticalAlignment::Top => (parts.panel_rect.min_y() + nudge, parts.trigger_rect.max_y() - nudge),
        };

        for x in [parts.panel_rect.min_x() + nudge, parts.panel_rect.max_x() - nudge] {
            prop_assert!(!path.contains(Point::new(x, panel_far_y)), "panel far corner at x={}", x);
        }
        for x in [parts.trigger_rect.min_x() + nudge, parts.trigger_rect.max_x() - nudge] {
            prop_assert!(!path.contains(Point::new(x, trigger_far_y)), "trigger far corner at x={}", x);
        }
    }

    #[test]
    fn near_corner_under_straight_collar_is_square(g in geometry()) {
        let a = Alignment::new(HorizontalAlignment::Right, VerticalAlignment::Bottom);
        let parts = compute_outline_parts(g.trigger, g.panel, a, g.radius);
        let path = parts.combined();
        let p = Point::new(parts.panel_rect.min_x() + 0.2, parts.panel_rect.min_y() + 0.2);
        prop_assert!(path.contains(p));
    }

    #[test]
    fn bodies_and_collar_are_filled(a in alignment(), g in geometry()) {
        let parts = compute_outline_parts(g.trigger, g.panel, a, g.radius);
        let path = parts.combined();
        let t = parts.trigger_rect;
        let collar_y = match a.vertical {
            VerticalAlignment::Bottom => t.max_y() + g.radius / 2.0,
            VerticalAlignment::Top => t.min_y() - g.radius / 2.0,
        };
        prop_assert!(path.contains(Point::new(t.mid_x(), t.mid_y())));
        prop_assert!(path.contains(Point::new(t.mid_x(), collar_y)));
        prop_assert!(path.contains(Point::new(parts.panel_rect.mid_x(), parts.panel_rect.mid_y())));
    }
}
