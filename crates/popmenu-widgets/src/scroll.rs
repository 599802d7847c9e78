#![forbid(unsafe_code)]

//! Vertical scroll state for the panel's item stack.
//!
//! # Invariants
//!
//! 1. `min_offset() == -insets.top`.
//! 2. `max_offset() >= min_offset()` even when content is shorter than the
//!    viewport.
//! 3. `offset()` always lies in `[min_offset(), max_offset()]`.

use popmenu_core::geometry::{Insets, Rect};

/// Offset, extents, and content insets of a vertical scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: f64,
    content_height: f64,
    view_height: f64,
    insets: Insets,
}

impl ScrollState {
    /// A scroll state resting at its minimum offset.
    #[must_use]
    pub fn new(content_height: f64, view_height: f64, insets: Insets) -> Self {
        let mut state = Self {
            offset: 0.0,
            content_height: content_height.max(0.0),
            view_height: view_height.max(0.0),
            insets,
        };
        state.offset = state.min_offset();
        state
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[inline]
    #[must_use]
    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    #[inline]
    #[must_use]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    #[inline]
    #[must_use]
    pub fn min_offset(&self) -> f64 {
        -self.insets.top
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.view_height + self.insets.bottom).max(self.min_offset())
    }

    /// Content taller than the viewport.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.view_height
    }

    /// Set the offset, clamped. Returns `true` if it changed.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        let clamped = offset.clamp(self.min_offset(), self.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Move the offset by `delta`, clamped. Returns `true` if it changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.set_offset(self.offset + delta)
    }

    pub fn scroll_to_max(&mut self) -> bool {
        self.set_offset(self.max_offset())
    }

    /// Update extents after a relayout, keeping the offset in range.
    pub fn resize(&mut self, content_height: f64, view_height: f64, insets: Insets) {
        self.content_height = content_height.max(0.0);
        self.view_height = view_height.max(0.0);
        self.insets = insets;
        self.set_offset(self.offset);
    }

    /// Content-space rows currently inside the viewport.
    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        (self.offset, self.offset + self.view_height)
    }

    /// Scroll the minimum distance that brings `rect` (content coordinates)
    /// into view. A rect taller than the viewport aligns its top edge.
    pub fn scroll_rect_to_visible(&mut self, rect: Rect) -> bool {
        let (top, bottom) = self.visible_range();
        if rect.min_y() < top || rect.height > self.view_height {
            self.set_offset(rect.min_y())
        } else if rect.max_y() > bottom {
            self.set_offset(rect.max_y() - self.view_height)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScrollState {
        ScrollState::new(600.0, 300.0, Insets::vertical(14.0, 6.0))
    }

    #[test]
    fn starts_at_min() {
        let s = state();
        assert_eq!(s.offset(), -14.0);
        assert_eq!(s.max_offset(), 306.0);
        assert!(s.is_scrollable());
    }

    #[test]
    fn short_content_never_inverts_bounds() {
        let s = ScrollState::new(100.0, 300.0, Insets::vertical(14.0, 6.0));
        assert_eq!(s.max_offset(), s.min_offset());
        assert!(!s.is_scrollable());
    }

    #[test]
    fn scroll_by_clamps_both_ends() {
        let mut s = state();
        assert!(!s.scroll_by(-5.0));
        assert!(s.scroll_by(1_000.0));
        assert_eq!(s.offset(), 306.0);
        assert!(!s.scroll_by(2.0));
    }

    #[test]
    fn reveal_adjusts_minimally() {
        let mut s = state();
        assert!(!s.scroll_rect_to_visible(Rect::new(0.0, 100.0, 10.0, 44.0)));
        assert!(s.scroll_rect_to_visible(Rect::new(0.0, 400.0, 10.0, 44.0)));
        assert_eq!(s.offset(), 144.0);
        assert!(s.scroll_rect_to_visible(Rect::new(0.0, 20.0, 10.0, 44.0)));
        assert_eq!(s.offset(), 20.0);
    }

    #[test]
    fn resize_reclamps() {
        let mut s = state();
        s.scroll_to_max();
        s.resize(400.0, 300.0, Insets::vertical(14.0, 6.0));
        assert_eq!(s.offset(), 106.0);
    }
}
