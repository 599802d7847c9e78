#![forbid(unsafe_code)]

//! Edge autoscroll while dragging near the top or bottom of the viewport.
//!
//! The scroller owns a [`TaskSlot`]. [`EdgeAutoscroller::update`] starts or
//! stops the repeating task as the pointer enters or leaves an edge band;
//! [`EdgeAutoscroller::tick`] applies one step per due period. Missed
//! periods are coalesced, so a stalled host never produces a burst of steps.
//!
//! # Invariants
//!
//! 1. The task runs only while a drag is active, the pointer is in a band,
//!    and the content is scrollable.
//! 2. `update` never restarts a running task.
//! 3. The offset never leaves `[min_offset, max_offset]`.

use popmenu_runtime::TaskSlot;
use web_time::Instant;

use crate::config::AutoscrollPolicyConfig;
use crate::scroll::ScrollState;

/// Which edge band the pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    Top,
    Bottom,
}

/// Result of re-evaluating the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoscrollChange {
    Started(ScrollEdge),
    Stopped,
    Unchanged,
}

/// Periodic offset nudger for drag-to-scroll.
#[derive(Debug, Clone)]
pub struct EdgeAutoscroller {
    config: AutoscrollPolicyConfig,
    task: TaskSlot,
    edge: Option<ScrollEdge>,
}

impl EdgeAutoscroller {
    #[must_use]
    pub fn new(config: AutoscrollPolicyConfig) -> Self {
        Self {
            config,
            task: TaskSlot::new(),
            edge: None,
        }
    }

    /// Band containing viewport-local `y`, if scrolling is possible.
    #[must_use]
    pub fn band_at(&self, y: f64, scroll: &ScrollState) -> Option<ScrollEdge> {
        if !scroll.is_scrollable() {
            return None;
        }
        if y < self.config.top_band {
            Some(ScrollEdge::Top)
        } else if y > scroll.view_height() - self.config.bottom_band {
            Some(ScrollEdge::Bottom)
        } else {
            None
        }
    }

    /// Re-evaluate after the pointer moved to viewport-local `y`.
    pub fn update(
        &mut self,
        drag_active: bool,
        y: Option<f64>,
        scroll: &ScrollState,
        now: Instant,
    ) -> AutoscrollChange {
        let band = y.and_then(|y| self.band_at(y, scroll));
        match band {
            None => {
                if self.stop() {
                    AutoscrollChange::Stopped
                } else {
                    AutoscrollChange::Unchanged
                }
            }
            Some(edge) => {
                self.edge = Some(edge);
                if drag_active && self.task.start_if_idle(self.config.period(), now) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(message = "panel.autoscroll.start", edge = ?edge);
                    AutoscrollChange::Started(edge)
                } else {
                    AutoscrollChange::Unchanged
                }
            }
        }
    }

    /// Apply a step if one is due. Returns `true` when the task fired, which
    /// means the caller should recompute the highlight.
    pub fn tick(&mut self, now: Instant, scroll: &mut ScrollState) -> bool {
        if !self.task.poll(now) {
            return false;
        }
        match self.edge {
            Some(ScrollEdge::Top) => {
                scroll.scroll_by(-self.config.step);
            }
            Some(ScrollEdge::Bottom) => {
                scroll.scroll_by(self.config.step);
            }
            None => {}
        }
        true
    }

    /// Cancel the task. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        self.edge = None;
        let was_running = self.task.cancel();
        if was_running {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panel.autoscroll.stop");
        }
        was_running
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    #[must_use]
    pub fn edge(&self) -> Option<ScrollEdge> {
        self.edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popmenu_core::geometry::Insets;
    use web_time::Duration;

    const PERIOD: Duration = Duration::from_millis(16);

    fn scroll() -> ScrollState {
        ScrollState::new(600.0, 300.0, Insets::vertical(14.0, 6.0))
    }

    fn scroller() -> EdgeAutoscroller {
        EdgeAutoscroller::new(AutoscrollPolicyConfig::default())
    }

    #[test]
    fn bands_follow_viewport() {
        let s = scroll();
        let a = scroller();
        assert_eq!(a.band_at(10.0, &s), Some(ScrollEdge::Top));
        assert_eq!(a.band_at(69.9, &s), Some(ScrollEdge::Top));
        assert_eq!(a.band_at(150.0, &s), None);
        assert_eq!(a.band_at(290.0, &s), Some(ScrollEdge::Bottom));
    }

    #[test]
    fn short_content_has_no_bands() {
        let s = ScrollState::new(100.0, 300.0, Insets::vertical(14.0, 6.0));
        assert_eq!(scroller().band_at(10.0, &s), None);
    }

    #[test]
    fn requires_active_drag() {
        let t = Instant::now();
        let s = scroll();
        let mut a = scroller();
        assert_eq!(a.update(false, Some(10.0), &s, t), AutoscrollChange::Unchanged);
        assert!(!a.is_running());
        assert_eq!(
            a.update(true, Some(10.0), &s, t),
            AutoscrollChange::Started(ScrollEdge::Top)
        );
        assert_eq!(a.update(true, Some(12.0), &s, t), AutoscrollChange::Unchanged);
    }

    #[test]
    fn bottom_band_scrolls_down() {
        let t = Instant::now();
        let mut s = scroll();
        let mut a = scroller();
        a.update(true, Some(295.0), &s, t);
        assert!(a.tick(t + PERIOD, &mut s));
        assert_eq!(s.offset(), -12.0);
    }

    #[test]
    fn top_band_clamps_at_min() {
        let t = Instant::now();
        let mut s = scroll();
        s.set_offset(-8.0);
        let mut a = scroller();
        a.update(true, Some(5.0), &s, t);
        let offsets: Vec<f64> = (1..=5)
            .map(|i| {
                a.tick(t + PERIOD * i, &mut s);
                s.offset()
            })
            .collect();
        assert_eq!(offsets, vec![-10.0, -12.0, -14.0, -14.0, -14.0]);
    }

    #[test]
    fn leaving_bands_stops() {
        let t = Instant::now();
        let mut s = scroll();
        let mut a = scroller();
        a.update(true, Some(5.0), &s, t);
        assert_eq!(a.update(true, Some(150.0), &s, t), AutoscrollChange::Stopped);
        assert!(!a.tick(t + PERIOD * 3, &mut s));
        assert_eq!(s.offset(), -14.0);
    }

    #[test]
    fn stall_is_coalesced() {
        let t = Instant::now();
        let mut s = scroll();
        let mut a = scroller();
        a.update(true, Some(295.0), &s, t);
        assert!(a.tick(t + PERIOD * 10, &mut s));
        assert!(!a.tick(t + PERIOD * 10, &mut s));
        assert_eq!(s.offset(), -12.0);
    }
}
