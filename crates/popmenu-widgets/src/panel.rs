#![forbid(unsafe_code)]

//! The popup panel: a scrollable row stack fused to its trigger.
//!
//! A [`PopupPanel`] owns one view per item, the current highlight, the edge
//! autoscroller, and the outline-derived masks. It knows nothing about
//! gestures: the trigger feeds it pointer positions, drag state, and
//! selection requests, and drives time through [`PopupPanel::tick`].
//!
//! Points passed in are in panel space (see [`crate::layout`]), except for
//! [`PopupPanel::set_highlighted_position`], whose `y` is trigger-relative.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► Opening ──attach──► Open ──begin_close(animated)──► Closing ──fade──► Closed
//!                               └─────begin_close(instant)───────────────────►┘
//! ```
//!
//! # Invariants
//!
//! 1. Masks are regenerated after every relayout, so they always match the
//!    current geometry.
//! 2. At most one selection is in flight.
//! 3. Autoscroll never runs outside `Open` or without an active drag.
//! 4. A closing panel always reaches `Closed` once its fade completes.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use popmenu_core::geometry::{Point, Rect};
use popmenu_outline::{Alignment, OutlinePath, RenderMask, ShadowMask, compute_outline};
use popmenu_runtime::{Completion, Fade, Pending, completion};
use web_time::Instant;

#[cfg(feature = "tracing")]
use crate::autoscroll::AutoscrollChange;
use crate::autoscroll::EdgeAutoscroller;
use crate::chrome::{Title, push_title, title_frame};
use crate::config::MenuConfig;
use crate::display::{ContentFade, DisplayList, DrawCommand};
use crate::highlight::{HighlightTracker, hit_test, wrap_pointer};
use crate::item::{LayoutInvalidator, MenuItem, MenuItemView};
use crate::layout::PanelLayout;
use crate::scroll::ScrollState;
use crate::theme::MenuTheme;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where the panel is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Opening,
    Open,
    Closing,
    Closed,
}

/// A resolved selection.
#[derive(Clone)]
pub struct Selection {
    pub index: usize,
    pub item: Rc<dyn MenuItem>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

struct InFlight {
    index: usize,
    item_done: Pending<()>,
    resolve: Completion<Selection>,
}

/// What changed during one [`PopupPanel::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelTick {
    /// Row newly highlighted by an autoscroll step.
    pub highlight_changed: Option<usize>,
    pub scrolled: bool,
    /// The panel reached `Closed` during this tick.
    pub closed: bool,
}

/// Outline and the masks derived from it, all in panel space except the
/// shadow mask's own canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelMasks {
    pub outline: OutlinePath,
    pub render: RenderMask,
    pub shadow: ShadowMask,
}

// ---------------------------------------------------------------------------
// PopupPanel
// ---------------------------------------------------------------------------

/// Scrollable menu panel attached to a trigger.
pub struct PopupPanel {
    title: Title,
    items: Vec<Rc<dyn MenuItem>>,
    views: Vec<Box<dyn MenuItemView>>,
    theme: Rc<dyn MenuTheme>,
    alignment: Alignment,
    config: MenuConfig,
    invalidator: LayoutInvalidator,
    phase: PanelPhase,
    trigger_bounds: Option<Rect>,
    layout: Option<PanelLayout>,
    scroll: ScrollState,
    tracker: HighlightTracker,
    autoscroll: EdgeAutoscroller,
    pointer: Option<Point>,
    drag_active: bool,
    masks: Option<PanelMasks>,
    in_flight: Option<InFlight>,
    fade: Option<Fade>,
    fade_done: Rc<Cell<bool>>,
    alpha: f32,
}

impl PopupPanel {
    /// Build the row views. The panel stays in `Opening` until attached.
    #[must_use]
    pub fn new(
        title: Title,
        items: Vec<Rc<dyn MenuItem>>,
        theme: Rc<dyn MenuTheme>,
        alignment: Alignment,
        config: MenuConfig,
    ) -> Self {
        let invalidator = LayoutInvalidator::new();
        let views = items
            .iter()
            .map(|item| {
                let mut view = item.view();
                view.apply_theme(theme.as_ref());
                view.set_layout_invalidator(invalidator.clone());
                view
            })
            .collect();
        let autoscroll = EdgeAutoscroller::new(config.autoscroll.clone());
        Self {
            title,
            items,
            views,
            theme,
            alignment,
            config,
            invalidator,
            phase: PanelPhase::Opening,
            trigger_bounds: None,
            layout: None,
            scroll: ScrollState::default(),
            tracker: HighlightTracker::new(),
            autoscroll,
            pointer: None,
            drag_active: false,
            masks: None,
            in_flight: None,
            fade: None,
            fade_done: Rc::new(Cell::new(false)),
            alpha: 1.0,
        }
    }

    /// Lay out against the trigger, build masks, reveal the initial focus
    /// row, and open.
    pub fn attach(&mut self, trigger_bounds: Rect) {
        self.trigger_bounds = Some(trigger_bounds);
        let layout = self.compute_layout(trigger_bounds);
        self.scroll = ScrollState::new(layout.content_height, layout.view_height(), layout.insets);
        self.layout = Some(layout);
        self.generate_mask_and_shadow();

        if self.alignment.vertical == popmenu_outline::VerticalAlignment::Top {
            self.scroll.scroll_to_max();
        }
        self.reveal_initial_focus();

        if self.phase == PanelPhase::Opening {
            self.phase = PanelPhase::Open;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.attach",
            rows = self.views.len(),
            view_height = self.scroll.view_height(),
            offset = self.scroll.offset(),
        );
    }

    /// Track a trigger resize. Ignored until attached.
    pub fn set_trigger_bounds(&mut self, trigger_bounds: Rect) {
        if self.trigger_bounds.is_none() || self.trigger_bounds == Some(trigger_bounds) {
            return;
        }
        self.trigger_bounds = Some(trigger_bounds);
        self.relayout();
    }

    /// Rebuild the outline and masks from the current layout.
    ///
    /// Returns `false` without doing anything while detached.
    pub fn generate_mask_and_shadow(&mut self) -> bool {
        let Some(layout) = &self.layout else {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "panel.mask.skip");
            return false;
        };
        let panel = &self.config.panel;
        let bounds = layout.bounds();
        let outline = compute_outline(
            layout.trigger_size.to_rect(),
            bounds,
            self.alignment.horizontal,
            self.alignment.vertical,
            panel.corner_radius,
        );
        self.masks = Some(PanelMasks {
            render: RenderMask::from_outline(&outline),
            shadow: ShadowMask::from_outline(
                &outline,
                bounds,
                panel.shadow_inset,
                panel.shadow_offset,
            ),
            outline,
        });
        true
    }

    /// Whether `p` (panel space) lies in the scroll container.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|l| l.scroll_container.contains(p))
    }

    /// Move the highlight pointer. `y` is trigger-relative.
    ///
    /// Returns `true` when a new row became highlighted.
    pub fn set_highlighted_position(&mut self, pointer: Option<Point>, now: Instant) -> bool {
        self.pointer = pointer;
        let changed = self.refresh_highlight();
        self.update_autoscroll(now);
        changed
    }

    /// Start or end the drag. Ending it stops autoscroll immediately.
    pub fn set_drag_active(&mut self, active: bool, now: Instant) {
        self.drag_active = active;
        if active {
            self.update_autoscroll(now);
        } else {
            self.autoscroll.stop();
        }
    }

    /// Select the row under `point` (panel space).
    ///
    /// The returned handle resolves once the row's selection animation has
    /// finished. Returns `None` on a miss, while another selection is in
    /// flight, or when the panel is not open. Only the scroll container is
    /// hit-tested, so rows scrolled under the trigger cannot be selected.
    pub fn select_at(&mut self, point: Point, now: Instant) -> Option<Pending<Selection>> {
        if self.phase != PanelPhase::Open || self.in_flight.is_some() {
            return None;
        }
        let layout = self.layout.as_ref()?;
        if !layout.scroll_container.contains(point) {
            return None;
        }
        let (index, _) = hit_test(&self.views, layout, self.scroll.offset(), point)?;

        for (i, view) in self.views.iter_mut().enumerate() {
            view.set_highlighted(i == index);
        }
        let (item_done, item_pending) = completion();
        let (resolve, pending) = completion();
        self.views[index].start_selection_animation(now, item_done);
        self.in_flight = Some(InFlight {
            index,
            item_done: item_pending,
            resolve,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.select", index);
        self.poll_selection();
        Some(pending)
    }

    /// Begin closing. Animated closes fade out; otherwise the panel is
    /// `Closed` on return.
    pub fn begin_close(&mut self, animated: bool, now: Instant) {
        if !animated {
            self.close_immediately();
            return;
        }
        if !self.stop_interaction() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.close", animated);
        let done = Rc::clone(&self.fade_done);
        self.fade =
            Some(Fade::out(now, self.config.panel.fade_out()).on_complete(move || done.set(true)));
        self.phase = PanelPhase::Closing;
    }

    /// Close without a fade.
    pub fn close_immediately(&mut self) {
        if !self.stop_interaction() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.close", animated = false);
        self.alpha = 0.0;
        self.phase = PanelPhase::Closed;
    }

    /// Advance fade, autoscroll, row animations, relayout requests, and the
    /// pending selection.
    pub fn tick(&mut self, now: Instant) -> PanelTick {
        let mut out = PanelTick::default();

        if let Some(fade) = &mut self.fade {
            self.alpha = fade.tick(now);
        }
        if self.fade_done.replace(false) {
            self.fade = None;
            self.phase = PanelPhase::Closed;
            out.closed = true;
        }

        if self.phase == PanelPhase::Open && self.autoscroll.tick(now, &mut self.scroll) {
            out.scrolled = true;
            if self.refresh_highlight() {
                out.highlight_changed = self.tracker.current();
            }
        }

        for view in &mut self.views {
            view.tick(now);
        }
        if self.invalidator.take() {
            self.relayout();
        }
        self.poll_selection();
        out
    }

    pub fn apply_theme(&mut self, theme: Rc<dyn MenuTheme>) {
        for view in &mut self.views {
            view.apply_theme(theme.as_ref());
        }
        self.theme = theme;
        self.relayout();
    }

    pub fn set_title(&mut self, title: Title) {
        self.title = title;
    }

    /// Alpha ramp for the scroll container's top edge.
    #[must_use]
    pub fn content_fade(&self) -> ContentFade {
        ContentFade::top_edge(self.config.panel.content_fade_height)
    }

    /// Draw commands in panel space. Empty while detached.
    #[must_use]
    pub fn display_list(&self) -> DisplayList {
        let mut out = DisplayList::new();
        let (Some(layout), Some(masks)) = (&self.layout, &self.masks) else {
            return out;
        };
        let theme = self.theme.as_ref();

        out.push(DrawCommand::PushLayer { alpha: self.alpha });
        out.push(DrawCommand::Shadow {
            path: masks.outline.clone(),
            canvas: masks.shadow.canvas_frame(),
            offset: masks.shadow.offset,
            color: theme.shadow_color(),
            opacity: theme.shadow_opacity(),
            radius: theme.shadow_radius(),
        });
        out.push(DrawCommand::Backdrop {
            path: masks.render.path.clone(),
            blur: theme.blur_style(),
            tint: theme.background_tint(),
        });
        let frame = title_frame(&self.title, layout.trigger_rect(), self.alignment.vertical);
        push_title(&self.title, frame, theme, theme.dark_tint_color(), &mut out);

        out.push(DrawCommand::PushClip {
            rect: layout.scroll_container,
            fade: Some(self.content_fade()),
        });
        for (index, view) in self.views.iter().enumerate() {
            let Some(row) = layout.item_frame_in_panel(index, self.scroll.offset()) else {
                break;
            };
            if row.intersection_opt(&layout.scroll_container).is_some() {
                view.draw(row, &mut out);
            }
        }
        out.push(DrawCommand::PopClip);
        out.push(DrawCommand::PopLayer);
        out
    }

    // --- accessors ---------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn layout(&self) -> Option<&PanelLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.tracker.current()
    }

    #[must_use]
    pub fn masks(&self) -> Option<&PanelMasks> {
        self.masks.as_ref()
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[must_use]
    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    #[must_use]
    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_running()
    }

    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Panel frame in trigger space.
    #[must_use]
    pub fn frame(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.frame)
    }

    /// Panel bounds in panel space.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.layout.as_ref().map(PanelLayout::bounds)
    }

    #[must_use]
    pub fn items(&self) -> &[Rc<dyn MenuItem>] {
        &self.items
    }

    #[must_use]
    pub fn views(&self) -> &[Box<dyn MenuItemView>] {
        &self.views
    }

    // --- internals ---------------------------------------------------------

    fn compute_layout(&self, trigger_bounds: Rect) -> PanelLayout {
        let sizes: Vec<_> = self.views.iter().map(|v| v.preferred_size()).collect();
        PanelLayout::compute(
            trigger_bounds.size(),
            &sizes,
            self.alignment,
            &self.config.panel,
        )
    }

    fn relayout(&mut self) {
        let Some(trigger_bounds) = self.trigger_bounds else {
            return;
        };
        let layout = self.compute_layout(trigger_bounds);
        self.scroll
            .resize(layout.content_height, layout.view_height(), layout.insets);
        self.layout = Some(layout);
        self.generate_mask_and_shadow();
        self.refresh_highlight();
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "panel.relayout", rows = self.views.len());
    }

    fn reveal_initial_focus(&mut self) {
        let Some(layout) = &self.layout else {
            return;
        };
        let target = self.views.iter().enumerate().find_map(|(i, view)| {
            let local = view.initial_focus_rect()?;
            let row = layout.item_frames.get(i)?;
            Some(local.offset_by(row.x, row.y))
        });
        if let Some(rect) = target {
            self.scroll.scroll_rect_to_visible(rect);
        }
    }

    /// Cancel drag, autoscroll, and any selection. Returns `false` if the
    /// panel is already closing.
    fn stop_interaction(&mut self) -> bool {
        if matches!(self.phase, PanelPhase::Closing | PanelPhase::Closed) {
            return false;
        }
        self.autoscroll.stop();
        self.drag_active = false;
        self.in_flight = None;
        true
    }

    fn refresh_highlight(&mut self) -> bool {
        let Some(layout) = &self.layout else {
            return false;
        };
        self.tracker
            .update(self.pointer, &mut self.views, layout, self.scroll.offset())
            .changed
    }

    fn update_autoscroll(&mut self, now: Instant) {
        let Some(layout) = &self.layout else {
            return;
        };
        let active = self.drag_active && self.phase == PanelPhase::Open;
        let y = self
            .pointer
            .map(|p| layout.panel_to_viewport(wrap_pointer(p, layout)).y);
        let _change = self.autoscroll.update(active, y, &self.scroll, now);
        #[cfg(feature = "tracing")]
        if let AutoscrollChange::Started(edge) = _change {
            tracing::trace!(message = "panel.autoscroll.band", edge = ?edge, y = ?y);
        }
    }

    fn poll_selection(&mut self) {
        let ready = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.item_done.try_take().is_some());
        if !ready {
            return;
        }
        if let Some(flight) = self.in_flight.take() {
            let item = Rc::clone(&self.items[flight.index]);
            flight.resolve.complete(Selection {
                index: flight.index,
                item,
            });
        }
    }
}

impl fmt::Debug for PopupPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupPanel")
            .field("title", &self.title)
            .field("rows", &self.views.len())
            .field("alignment", &self.alignment)
            .field("phase", &self.phase)
            .field("offset", &self.scroll.offset())
            .field("highlighted", &self.tracker.current())
            .finish_non_exhaustive()
    }
}
