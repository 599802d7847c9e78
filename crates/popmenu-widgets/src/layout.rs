#![forbid(unsafe_code)]

//! Panel layout: frame, scroll viewport, and item stack.
//!
//! Coordinates:
//!
//! - **trigger space**: origin at the trigger's top-left.
//! - **panel space**: origin at the fused panel's top-left. The panel frame
//!   covers the trigger and the scroll container.
//! - **content space**: origin at the top of the item stack.
//!
//! ```text
//!  bottom alignment        top alignment
//!  +---------+             +-----------------+ <- panel y = -scroll_h
//!  | trigger |             |                 |
//!  +---------+-------+     | scroll container|
//!  |                 |     |                 |
//!  | scroll container|     +---------+-------+ <- trigger y = 0
//!  |                 |     | trigger |
//!  +-----------------+     +---------+
//! ```

use popmenu_core::geometry::{Insets, Point, Rect, Size};
use popmenu_outline::{Alignment, HorizontalAlignment, VerticalAlignment, place_trigger};

use crate::config::PanelPolicyConfig;

/// Resolved geometry of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub alignment: Alignment,
    pub trigger_size: Size,
    /// Panel frame in trigger space.
    pub frame: Rect,
    /// Scroll container in panel space.
    pub scroll_container: Rect,
    /// Scroll content insets.
    pub insets: Insets,
    /// Row frames in content space, top to bottom, no gaps.
    pub item_frames: Vec<Rect>,
    pub content_height: f64,
}

impl PanelLayout {
    /// Lay out rows of `item_sizes` under (or over) a trigger.
    #[must_use]
    pub fn compute(
        trigger_size: Size,
        item_sizes: &[Size],
        alignment: Alignment,
        config: &PanelPolicyConfig,
    ) -> Self {
        let r = config.corner_radius;
        let pad = config.scroll_padding;
        let insets = match alignment.vertical {
            VerticalAlignment::Bottom => Insets::vertical(r + pad, pad),
            VerticalAlignment::Top => Insets::vertical(r + pad, r + pad),
        };

        let widest = item_sizes.iter().map(|s| s.width).fold(0.0, f64::max);
        let width = (trigger_size.width + config.min_extra_width).max(widest);

        let mut y = 0.0;
        let item_frames: Vec<Rect> = item_sizes
            .iter()
            .map(|s| {
                let frame = Rect::new(0.0, y, width, s.height.max(0.0));
                y += frame.height;
                frame
            })
            .collect();
        let content_height = y;

        let scroll_h = (content_height + insets.vertical_sum()).min(config.max_height);

        let x = match alignment.horizontal {
            HorizontalAlignment::Right => 0.0,
            HorizontalAlignment::Left => trigger_size.width - width,
            HorizontalAlignment::Center => trigger_size.width / 2.0 - width / 2.0,
        };
        let (frame_y, container_y) = match alignment.vertical {
            VerticalAlignment::Bottom => (0.0, trigger_size.height),
            VerticalAlignment::Top => (-scroll_h, 0.0),
        };

        Self {
            alignment,
            trigger_size,
            frame: Rect::new(x, frame_y, width, trigger_size.height + scroll_h),
            scroll_container: Rect::new(0.0, container_y, width, scroll_h),
            insets,
            item_frames,
            content_height,
        }
    }

    /// The panel frame in panel space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    /// The trigger's rect in panel space.
    #[must_use]
    pub fn trigger_rect(&self) -> Rect {
        place_trigger(self.trigger_size.to_rect(), self.bounds(), self.alignment)
    }

    #[must_use]
    pub fn view_height(&self) -> f64 {
        self.scroll_container.height
    }

    /// Row frame in panel space at `scroll_offset`.
    #[must_use]
    pub fn item_frame_in_panel(&self, index: usize, scroll_offset: f64) -> Option<Rect> {
        let f = self.item_frames.get(index)?;
        Some(f.offset_by(
            self.scroll_container.x,
            self.scroll_container.y - scroll_offset,
        ))
    }

    /// Trigger space to panel space.
    #[must_use]
    pub fn trigger_to_panel(&self, p: Point) -> Point {
        self.frame.to_local(p)
    }

    /// Panel space to scroll-viewport space.
    #[must_use]
    pub fn panel_to_viewport(&self, p: Point) -> Point {
        self.scroll_container.to_local(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIGGER: Size = Size::new(60.0, 40.0);

    fn rows(n: usize) -> Vec<Size> {
        vec![Size::new(120.0, 44.0); n]
    }

    fn layout(h: HorizontalAlignment, v: VerticalAlignment, n: usize) -> PanelLayout {
        PanelLayout::compute(
            TRIGGER,
            &rows(n),
            Alignment::new(h, v),
            &PanelPolicyConfig::default(),
        )
    }

    #[test]
    fn bottom_insets_and_height() {
        let l = layout(HorizontalAlignment::Right, VerticalAlignment::Bottom, 3);
        assert_eq!(l.insets, Insets::vertical(14.0, 6.0));
        assert_eq!(l.content_height, 132.0);
        assert_eq!(l.view_height(), 152.0);
        assert_eq!(l.frame, Rect::new(0.0, 0.0, 160.0, 192.0));
        assert_eq!(l.scroll_container, Rect::new(0.0, 40.0, 160.0, 152.0));
    }

    #[test]
    fn viewport_is_capped() {
        let l = layout(HorizontalAlignment::Right, VerticalAlignment::Bottom, 20);
        assert_eq!(l.view_height(), 300.0);
        assert_eq!(l.frame.height, 340.0);
    }

    #[test]
    fn top_alignment_sits_above_trigger() {
        let l = layout(HorizontalAlignment::Left, VerticalAlignment::Top, 2);
        assert_eq!(l.insets, Insets::vertical(14.0, 14.0));
        let scroll_h = 88.0 + 28.0;
        assert_eq!(l.frame, Rect::new(60.0 - 160.0, -scroll_h, 160.0, 40.0 + scroll_h));
        assert_eq!(l.scroll_container.y, 0.0);
        assert_eq!(l.trigger_rect(), Rect::new(100.0, scroll_h, 60.0, 40.0));
    }

    #[test]
    fn centre_alignment_centres_frame() {
        let l = layout(HorizontalAlignment::Center, VerticalAlignment::Bottom, 1);
        assert_eq!(l.frame.mid_x(), TRIGGER.width / 2.0);
    }

    #[test]
    fn wide_rows_widen_panel() {
        let l = PanelLayout::compute(
            TRIGGER,
            &[Size::new(400.0, 44.0)],
            Alignment::default(),
            &PanelPolicyConfig::default(),
        );
        assert_eq!(l.frame.width, 400.0);
    }

    #[test]
    fn item_frames_follow_scroll() {
        let l = layout(HorizontalAlignment::Right, VerticalAlignment::Bottom, 3);
        let f = l.item_frame_in_panel(1, -14.0).unwrap();
        assert_eq!(f, Rect::new(0.0, 40.0 + 14.0 + 44.0, 160.0, 44.0));
        assert!(l.item_frame_in_panel(3, 0.0).is_none());
    }
}
