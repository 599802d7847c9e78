//! Property tests for scroll clamping, autoscroll, and highlight tracking.
//!
//! 1. Any delta sequence keeps the offset within `[min, max]`.
//! 2. `max_offset() >= min_offset()` for any extents.
//! 3. Any number of autoscroll ticks in either band stays clamped.
//! 4. The highlight never names more than one row, and it names a laid-out
//!    row whenever it is set.

use popmenu_core::geometry::{Insets, Point, Size};
use popmenu_core::{Duration, Instant};
use popmenu_outline::Alignment;
use popmenu_widgets::{
    ActionItem, AutoscrollPolicyConfig, EdgeAutoscroller, HighlightTracker, MenuItem,
    MenuItemView, PanelLayout, PanelPolicyConfig, ScrollState,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn extents() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0.0f64..2000.0, 1.0f64..400.0, 0.0f64..30.0, 0.0f64..30.0)
}

fn alignment() -> impl Strategy<Value = Alignment> {
    (0usize..6).prop_map(|i| Alignment::ALL[i])
}

fn assert_clamped(s: &ScrollState) {
    assert!(s.min_offset() <= s.max_offset());
    assert!(s.offset() >= s.min_offset(), "{s:?}");
    assert!(s.offset() <= s.max_offset(), "{s:?}");
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn deltas_stay_clamped(
        (content, view, top, bottom) in extents(),
        deltas in proptest::collection::vec(-500.0f64..500.0, 0..40),
    ) {
        let mut s = ScrollState::new(content, view, Insets::vertical(top, bottom));
        assert_clamped(&s);
        for d in deltas {
            s.scroll_by(d);
            assert_clamped(&s);
        }
    }

    #[test]
    fn resize_keeps_offset_in_range(
        (content, view, top, bottom) in extents(),
        (content2, view2, top2, bottom2) in extents(),
        target in -1000.0f64..3000.0,
    ) {
        let mut s = ScrollState::new(content, view, Insets::vertical(top, bottom));
        s.set_offset(target);
        s.resize(content2, view2, Insets::vertical(top2, bottom2));
        assert_clamped(&s);
    }

    #[test]
    fn autoscroll_ticks_stay_clamped(
        rows in 8usize..60,
        top_band in any::<bool>(),
        ticks in 1u32..400,
    ) {
        let content = rows as f64 * 44.0;
        let mut s = ScrollState::new(content, 300.0, Insets::vertical(14.0, 6.0));
        let mut scroller = EdgeAutoscroller::new(AutoscrollPolicyConfig::default());
        let t = Instant::now();
        let y = if top_band { 5.0 } else { 295.0 };
        scroller.update(true, Some(y), &s, t);
        prop_assert!(scroller.is_running());
        let mut last = s.offset();
        for i in 1..=ticks {
            scroller.tick(t + Duration::from_millis(16) * i, &mut s);
            assert_clamped(&s);
            let step = (s.offset() - last).abs();
            prop_assert!(step <= 2.0 + 1e-9);
            last = s.offset();
        }
    }

    #[test]
    fn highlight_names_at_most_one_laid_out_row(
        rows in 1usize..15,
        align in alignment(),
        pointer in (-400.0f64..400.0, -400.0f64..700.0),
        offset_frac in 0.0f64..1.0,
    ) {
        let items: Vec<ActionItem> = (0..rows).map(|i| ActionItem::new(format!("r{i}"), || {})).collect();
        let mut views: Vec<Box<dyn MenuItemView>> = items.iter().map(|i| i.view()).collect();
        let sizes: Vec<Size> = views.iter().map(|v| v.preferred_size()).collect();
        let layout = PanelLayout::compute(
            Size::new(60.0, 40.0),
            &sizes,
            align,
            &PanelPolicyConfig::default(),
        );
        let mut s = ScrollState::new(layout.content_height, layout.view_height(), layout.insets);
        s.set_offset(s.min_offset() + (s.max_offset() - s.min_offset()) * offset_frac);

        let mut tracker = HighlightTracker::new();
        let up = tracker.update(Some(Point::new(pointer.0, pointer.1)), &mut views, &layout, s.offset());
        let lit = views.iter().filter(|v| v.is_highlighted()).count();
        prop_assert!(lit <= 1);
        prop_assert_eq!(up.local_positions.len(), rows);
        if let Some(i) = up.highlighted {
            prop_assert!(i < layout.item_frames.len());
            prop_assert!(views[i].is_highlighted());
        } else {
            prop_assert_eq!(lit, 0);
        }
    }
}

#[test]
fn every_alignment_lays_out_inside_frame() {
    for align in Alignment::ALL {
        let layout = PanelLayout::compute(
            Size::new(60.0, 40.0),
            &[Size::new(120.0, 44.0); 3],
            align,
            &PanelPolicyConfig::default(),
        );
        let bounds = layout.bounds();
        assert!(bounds.contains(layout.scroll_container.origin()), "{align:?}");
        assert_eq!(
            layout.scroll_container.union(&layout.trigger_rect()).height,
            bounds.height,
            "{align:?}"
        );
    }
}
