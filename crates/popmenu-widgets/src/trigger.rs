#![forbid(unsafe_code)]

//! The menu trigger: an always-visible anchor that owns gesture handling and
//! the lifecycle of its [`PopupPanel`].
//!
//! # Gesture handling
//!
//! Pointer events run through a [`GestureRecognizer`] whose policy lets the
//! press and the tap both recognise one touch. The trigger dispatches at most
//! one *confirm* per pointer sequence: a press that ends after
//! `select_after`, began on an already-open panel, or dragged into the
//! scroll container confirms, and a tap confirms only if nothing else did.
//!
//! ```text
//! Down ──► PressBegan ──► PressMoved* ──► PressEnded ──► (confirm if held long enough or dragged in)
//!   │                                          └──────► Tapped ──► (confirm unless done)
//!   └── outside the scroll container while open ──► dismiss, sequence consumed
//! ```
//!
//! # Coordination
//!
//! Each trigger subscribes to a shared [`PresentationBus`]. Opening a panel
//! broadcasts first, and every other trigger closes its panel without
//! animation before the new panel is built.
//!
//! # Invariants
//!
//! 1. At most one panel per trigger is open; closing panels only fade.
//! 2. At most one confirm per pointer sequence.
//! 3. An item's action runs once, after its selection animation and after
//!    the panel has started closing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use popmenu_core::event::{PointerEvent, PointerPhase};
use popmenu_core::geometry::{Point, Rect, Vector};
use popmenu_core::gesture::{GestureEvent, GestureRecognizer, SimultaneousPolicy};
use popmenu_outline::Alignment;
use popmenu_runtime::{Pending, PresentationBus, Subscription, TriggerId};
use web_time::{Duration, Instant};

use crate::chrome::{Title, TriggerChrome};
use crate::config::MenuConfig;
use crate::display::DisplayList;
use crate::item::MenuItem;
use crate::panel::{PanelPhase, PopupPanel, Selection};
use crate::theme::MenuTheme;

/// Notifications for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Opened,
    Closed { animated: bool },
    /// A new row is under the pointer. One per transition.
    HighlightChanged(usize),
    /// A row was confirmed; its action has run.
    ItemSelected(usize),
    /// A touch outside the panel closed it.
    Dismissed,
}

/// Produces the rows for each open.
pub type ItemSource = Box<dyn Fn() -> Vec<Rc<dyn MenuItem>>>;

/// Per-sequence drag bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    /// When the press opened the panel. `None` means the panel was already
    /// open, which counts as infinitely long ago.
    pub start: Option<Instant>,
    pub pointer: Option<Point>,
    /// The pointer reached the scroll container during this press.
    pub entered_panel: bool,
}

impl DragState {
    /// Whether the press has lasted longer than `threshold` at `now`.
    #[must_use]
    pub fn held_longer_than(&self, threshold: Duration, now: Instant) -> bool {
        self.start
            .is_none_or(|start| now.saturating_duration_since(start) > threshold)
    }
}

type PanelSlot = Rc<RefCell<Option<PopupPanel>>>;
type Outbox = Rc<RefCell<Vec<TriggerEvent>>>;

/// Anchor control for a popup menu.
pub struct MenuTrigger {
    id: TriggerId,
    bus: PresentationBus,
    _subscription: Subscription,
    title: Title,
    theme: Rc<dyn MenuTheme>,
    alignment: Alignment,
    config: MenuConfig,
    frame: Rect,
    items: ItemSource,
    panel: PanelSlot,
    fading: Vec<PopupPanel>,
    outbox: Outbox,
    recognizer: GestureRecognizer,
    drag: DragState,
    confirmed: bool,
    consumed: bool,
    selection: Option<Pending<Selection>>,
}

impl MenuTrigger {
    /// Create a trigger on `bus`. The item source starts empty.
    #[must_use]
    pub fn new(
        title: Title,
        theme: Rc<dyn MenuTheme>,
        bus: &PresentationBus,
        config: MenuConfig,
    ) -> Self {
        let id = bus.allocate_id();
        let panel: PanelSlot = Rc::new(RefCell::new(None));
        let outbox: Outbox = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let panel = Rc::clone(&panel);
            let outbox = Rc::clone(&outbox);
            bus.subscribe(id, move |sender| {
                #[cfg(not(feature = "tracing"))]
                let _ = sender;
                let Ok(mut slot) = panel.try_borrow_mut() else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(message = "menu.preempt.busy", %id, %sender);
                    return;
                };
                if let Some(mut open) = slot.take() {
                    open.close_immediately();
                    outbox
                        .borrow_mut()
                        .push(TriggerEvent::Closed { animated: false });
                    #[cfg(feature = "tracing")]
                    tracing::debug!(message = "menu.preempt", %id, %sender);
                }
            })
        };

        let recognizer = GestureRecognizer::new(
            config.gesture.to_gesture_config(),
            SimultaneousPolicy::press_with_tap(),
        );

        Self {
            id,
            bus: bus.clone(),
            _subscription: subscription,
            title,
            theme,
            alignment: Alignment::default(),
            config,
            frame: Rect::default(),
            items: Box::new(Vec::<Rc<dyn MenuItem>>::new),
            panel,
            fading: Vec::new(),
            outbox,
            recognizer,
            drag: DragState::default(),
            confirmed: false,
            consumed: false,
            selection: None,
        }
    }

    /// Set the item source (builder pattern).
    #[must_use]
    pub fn with_items(mut self, source: impl Fn() -> Vec<Rc<dyn MenuItem>> + 'static) -> Self {
        self.items = Box::new(source);
        self
    }

    /// Set the frame in host coordinates (builder pattern).
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Replace the item source. Takes effect on the next open.
    pub fn set_items(&mut self, source: impl Fn() -> Vec<Rc<dyn MenuItem>> + 'static) {
        self.items = Box::new(source);
    }

    // --- input -------------------------------------------------------------

    /// Feed a pointer event in trigger space.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Vec<TriggerEvent> {
        if event.phase == PointerPhase::Down {
            self.confirmed = false;
            self.consumed = false;
            if self.is_open() && !self.scroll_container_contains(event.position) {
                self.recognizer.reset();
                self.consumed = true;
                self.dismiss(event.time);
                return self.take_events();
            }
            let delay = if self.is_open() {
                self.config.gesture.open_press_delay()
            } else {
                Duration::ZERO
            };
            self.recognizer.set_min_press_duration(delay);
        }

        if self.consumed {
            if event.is_terminal() {
                self.consumed = false;
            }
            return self.take_events();
        }

        for gesture in self.recognizer.process(event) {
            self.handle_gesture(gesture);
        }
        self.take_events()
    }

    /// Advance time: pending presses, panel animation, selection, and fades.
    pub fn tick(&mut self, now: Instant) -> Vec<TriggerEvent> {
        if let Some(gesture) = self.recognizer.check_press(now) {
            self.handle_gesture(gesture);
        }

        let tick = self.panel.borrow_mut().as_mut().map(|p| p.tick(now));
        if let Some(index) = tick.and_then(|t| t.highlight_changed) {
            self.emit(TriggerEvent::HighlightChanged(index));
        }

        self.resolve_selection(now);

        for panel in &mut self.fading {
            panel.tick(now);
        }
        self.fading.retain(|p| p.phase() != PanelPhase::Closed);

        self.take_events()
    }

    /// Drain events queued outside `handle_pointer` / `tick` (for example
    /// by another trigger opening).
    pub fn take_events(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    // --- lifecycle -----------------------------------------------------------

    /// Broadcast, then build and attach a fresh panel.
    pub fn show_contents(&mut self, now: Instant) {
        if self.is_open() {
            return;
        }
        self.bus.will_present(self.id);

        let items = (self.items)();
        let mut panel = PopupPanel::new(
            self.title.clone(),
            items,
            Rc::clone(&self.theme),
            self.alignment,
            self.config.clone(),
        );
        panel.attach(self.bounds());
        #[cfg(feature = "tracing")]
        tracing::info!(
            message = "menu.open",
            id = %self.id,
            rows = panel.items().len(),
            alignment = ?self.alignment,
        );
        *self.panel.borrow_mut() = Some(panel);
        self.drag.start = Some(now);
        self.emit(TriggerEvent::Opened);
    }

    /// Close the open panel, fading it out when `animated`.
    pub fn hide_contents(&mut self, animated: bool, now: Instant) {
        let Some(mut panel) = self.panel.borrow_mut().take() else {
            return;
        };
        panel.begin_close(animated, now);
        if animated {
            self.fading.push(panel);
        }
        self.bus.dismissed(self.id);
        self.drag = DragState::default();
        self.selection = None;
        #[cfg(feature = "tracing")]
        tracing::info!(message = "menu.close", id = %self.id, animated);
        self.emit(TriggerEvent::Closed { animated });
    }

    // --- configuration -------------------------------------------------------

    pub fn apply_theme(&mut self, theme: Rc<dyn MenuTheme>) {
        if let Some(panel) = self.panel.borrow_mut().as_mut() {
            panel.apply_theme(Rc::clone(&theme));
        }
        self.theme = theme;
    }

    pub fn set_title(&mut self, title: Title) {
        if let Some(panel) = self.panel.borrow_mut().as_mut() {
            panel.set_title(title.clone());
        }
        self.title = title;
    }

    /// Alignment for panels opened from now on.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Move or resize the trigger. An open panel re-lays out.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        let bounds = self.bounds();
        if let Some(panel) = self.panel.borrow_mut().as_mut() {
            panel.set_trigger_bounds(bounds);
        }
    }

    // --- queries ---------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> TriggerId {
        self.id
    }

    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The trigger in its own space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    #[must_use]
    pub fn title(&self) -> &Title {
        &self.title
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.borrow().is_some()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Closing panels still fading out.
    #[must_use]
    pub fn fading_count(&self) -> usize {
        self.fading.len()
    }

    /// Run `f` against the open panel.
    pub fn with_panel<R>(&self, f: impl FnOnce(&PopupPanel) -> R) -> Option<R> {
        self.panel.borrow().as_ref().map(f)
    }

    /// Whether `p` (trigger space) hits the trigger or its open panel.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> bool {
        self.bounds().contains(p)
            || self
                .with_panel(|panel| panel.frame().is_some_and(|f| f.contains(p)))
                .unwrap_or(false)
    }

    /// Title, image, and gesture bar layout.
    #[must_use]
    pub fn chrome(&self) -> TriggerChrome {
        TriggerChrome::compute(
            self.frame.size(),
            &self.title,
            self.alignment.vertical,
            !self.is_open(),
        )
    }

    /// Draw commands in trigger space: the trigger, fading panels, then the
    /// open panel.
    #[must_use]
    pub fn display_list(&self) -> DisplayList {
        let mut out = DisplayList::new();
        self.chrome().draw(&self.title, self.theme.as_ref(), &mut out);
        let panel = self.panel.borrow();
        for p in self.fading.iter().chain(panel.as_ref()) {
            if let Some(frame) = p.frame() {
                out.extend_translated(p.display_list(), Vector::new(frame.x, frame.y));
            }
        }
        out
    }

    // --- internals -------------------------------------------------------------

    fn emit(&self, event: TriggerEvent) {
        self.outbox.borrow_mut().push(event);
    }

    fn scroll_container_contains(&self, p: Point) -> bool {
        self.with_panel(|panel| {
            panel
                .layout()
                .is_some_and(|l| panel.contains(l.trigger_to_panel(p)))
        })
        .unwrap_or(false)
    }

    fn handle_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::PressBegan { pos, time } => {
                if self.is_open() {
                    self.drag.start = None;
                } else {
                    self.show_contents(time);
                }
                self.drag.active = true;
                self.drag.entered_panel = false;
                if let Some(panel) = self.panel.borrow_mut().as_mut() {
                    panel.set_drag_active(true, time);
                }
                self.press_moved(pos, time);
            }
            GestureEvent::PressMoved { pos, time } => self.press_moved(pos, time),
            GestureEvent::PressEnded { pos, time } | GestureEvent::PressCancelled { pos, time } => {
                self.drag.active = false;
                if let Some(panel) = self.panel.borrow_mut().as_mut() {
                    panel.set_drag_active(false, time);
                }
                let held = self
                    .drag
                    .held_longer_than(self.config.gesture.select_after(), time);
                if held || self.drag.entered_panel {
                    self.confirm(pos, time);
                }
            }
            GestureEvent::Tapped { pos, time } => {
                if !self.confirmed {
                    self.confirm(pos, time);
                }
            }
        }
    }

    fn press_moved(&mut self, pos: Point, time: Instant) {
        self.drag.pointer = Some(pos);
        let highlighted = {
            let mut slot = self.panel.borrow_mut();
            let Some(panel) = slot.as_mut() else {
                return;
            };
            let Some(local) = panel.layout().map(|l| l.trigger_to_panel(pos)) else {
                return;
            };
            if !panel.contains(local) {
                return;
            }
            self.drag.entered_panel = true;
            let changed = panel.set_highlighted_position(Some(Point::new(local.x, pos.y)), time);
            if changed { panel.highlighted() } else { None }
        };
        if let Some(index) = highlighted {
            self.emit(TriggerEvent::HighlightChanged(index));
        }
    }

    /// Resolve the row under `pos`, or close when `pos` is outside the panel.
    fn confirm(&mut self, pos: Point, time: Instant) {
        self.confirmed = true;
        let outcome = {
            let mut slot = self.panel.borrow_mut();
            let Some(panel) = slot.as_mut() else {
                return;
            };
            let (Some(layout), Some(bounds)) = (panel.layout(), panel.bounds()) else {
                return;
            };
            let local = layout.trigger_to_panel(pos);
            if bounds.contains(local) {
                Some(panel.select_at(local, time))
            } else {
                None
            }
        };
        match outcome {
            Some(Some(pending)) => self.selection = Some(pending),
            Some(None) => {}
            None => self.hide_contents(true, time),
        }
    }

    fn dismiss(&mut self, now: Instant) {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "menu.dismiss", id = %self.id);
        self.emit(TriggerEvent::Dismissed);
        self.hide_contents(true, now);
    }

    fn resolve_selection(&mut self, now: Instant) {
        let Some(pending) = &self.selection else {
            return;
        };
        if let Some(selection) = pending.try_take() {
            self.selection = None;
            #[cfg(feature = "tracing")]
            tracing::info!(message = "menu.select", id = %self.id, index = selection.index);
            self.emit(TriggerEvent::ItemSelected(selection.index));
            self.hide_contents(true, now);
            selection.item.perform_action();
        } else if pending.is_orphaned() {
            self.selection = None;
        }
    }
}

impl fmt::Debug for MenuTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTrigger")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("alignment", &self.alignment)
            .field("frame", &self.frame)
            .field("open", &self.is_open())
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ActionItem;
    use crate::theme::Theme;
    use std::cell::Cell;

    fn trigger(bus: &PresentationBus) -> MenuTrigger {
        MenuTrigger::new(
            Title::text("Menu"),
            Rc::new(Theme::light()),
            bus,
            MenuConfig::default(),
        )
        .with_frame(Rect::new(10.0, 10.0, 60.0, 40.0))
        .with_items(|| {
            (0..3)
                .map(|i| Rc::new(ActionItem::new(format!("Row {i}"), || {})) as Rc<dyn MenuItem>)
                .collect()
        })
    }

    #[test]
    fn held_longer_than_treats_sentinel_as_infinite() {
        let t = Instant::now();
        let open = DragState::default();
        assert!(open.held_longer_than(Duration::from_secs(3600), t));
        let fresh = DragState {
            start: Some(t),
            ..DragState::default()
        };
        assert!(!fresh.held_longer_than(Duration::from_millis(300), t + Duration::from_millis(300)));
        assert!(fresh.held_longer_than(Duration::from_millis(300), t + Duration::from_millis(301)));
    }

    #[test]
    fn press_opens_immediately() {
        let bus = PresentationBus::new();
        let mut tr = trigger(&bus);
        let t = Instant::now();
        let events = tr.handle_pointer(&PointerEvent::down(Point::new(30.0, 20.0), t));
        assert_eq!(events, vec![TriggerEvent::Opened]);
        assert!(tr.is_open());
        assert!(tr.drag_state().active);
        assert_eq!(bus.active(), Some(tr.id()));
        assert!(!tr.chrome().backdrop_visible);
    }

    #[test]
    fn quick_tap_on_trigger_leaves_panel_open() {
        let bus = PresentationBus::new();
        let mut tr = trigger(&bus);
        let t = Instant::now();
        let p = Point::new(30.0, 20.0);
        tr.handle_pointer(&PointerEvent::down(p, t));
        let events = tr.handle_pointer(&PointerEvent::up(p, t + Duration::from_millis(100)));
        assert!(events.is_empty(), "{events:?}");
        assert!(tr.is_open());
    }

    #[test]
    fn down_outside_dismisses_and_consumes() {
        let bus = PresentationBus::new();
        let mut tr = trigger(&bus);
        let t = Instant::now();
        let p = Point::new(30.0, 20.0);
        tr.handle_pointer(&PointerEvent::down(p, t));
        tr.handle_pointer(&PointerEvent::up(p, t + Duration::from_millis(100)));

        let far = Point::new(500.0, 500.0);
        let events = tr.handle_pointer(&PointerEvent::down(far, t + Duration::from_secs(1)));
        assert_eq!(
            events,
            vec![TriggerEvent::Dismissed, TriggerEvent::Closed { animated: true }]
        );
        assert!(!tr.is_open());
        assert_eq!(tr.fading_count(), 1);
        assert_eq!(bus.active(), None);

        let up = tr.handle_pointer(&PointerEvent::up(far, t + Duration::from_millis(1100)));
        assert!(up.is_empty());
        tr.tick(t + Duration::from_millis(1300));
        assert_eq!(tr.fading_count(), 0);
    }

    #[test]
    fn drag_release_runs_action_once() {
        let bus = PresentationBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut tr = trigger(&bus).with_items(move || {
            let h = Rc::clone(&h);
            vec![Rc::new(ActionItem::new("Only", move || h.set(h.get() + 1))) as Rc<dyn MenuItem>]
        });
        let t = Instant::now();
        tr.handle_pointer(&PointerEvent::down(Point::new(30.0, 20.0), t));
        let row = Point::new(30.0, 40.0 + 14.0 + 22.0);
        let moved = tr.handle_pointer(&PointerEvent::moved(row, t + Duration::from_millis(200)));
        assert_eq!(moved, vec![TriggerEvent::HighlightChanged(0)]);
        tr.handle_pointer(&PointerEvent::up(row, t + Duration::from_millis(500)));

        let events = tr.tick(t + Duration::from_millis(700));
        assert_eq!(
            events,
            vec![TriggerEvent::ItemSelected(0), TriggerEvent::Closed { animated: true }]
        );
        assert_eq!(hits.get(), 1);
        tr.tick(t + Duration::from_millis(800));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn display_list_switches_between_trigger_and_panel() {
        let bus = PresentationBus::new();
        let mut tr = trigger(&bus);
        let closed = tr.display_list();
        assert_eq!(closed.texts().collect::<Vec<_>>(), vec!["Menu"]);

        tr.show_contents(Instant::now());
        let open = tr.display_list();
        assert!(open.is_balanced());
        let texts: Vec<_> = open.texts().collect();
        assert_eq!(texts, vec!["Menu", "Row 0", "Row 1", "Row 2"]);
    }
}
