#![forbid(unsafe_code)]

//! Menu item capabilities and the stock row types.
//!
//! A [`MenuItem`] is what the application supplies: it produces a row view
//! and performs its action. A [`MenuItemView`] is the row itself. The panel
//! owns one view per item in an ordered `Vec` and talks to it only through
//! this trait.
//!
//! Stock implementations: [`ActionItem`] (a titled row with an optional
//! shortcut label) and [`SeparatorItem`] (a hairline that never highlights).

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use popmenu_core::geometry::{Point, Rect, Size};
use popmenu_runtime::Completion;
use web_time::{Duration, Instant};

use crate::display::{DisplayList, DrawCommand};
use crate::theme::{FontSpec, MenuTheme, Rgba};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// An entry supplied by the application.
pub trait MenuItem {
    /// Build a fresh row view. Called once per panel.
    fn view(&self) -> Box<dyn MenuItemView>;
    fn perform_action(&self);
}

/// A row inside the panel.
pub trait MenuItemView {
    /// Size the row wants; the panel stretches rows to its own width.
    fn preferred_size(&self) -> Size;

    /// Hit test in row-local coordinates.
    fn contains(&self, local: Point, size: Size) -> bool {
        size.to_rect().contains(local)
    }

    fn set_highlighted(&mut self, highlighted: bool);
    fn is_highlighted(&self) -> bool;

    /// Pointer position in row-local coordinates. Rows that are not under
    /// the pointer still receive it (it lies outside their bounds).
    fn set_highlight_position(&mut self, _local: Point) {}

    /// Play the selection feedback and resolve `done` when it finishes.
    fn start_selection_animation(&mut self, now: Instant, done: Completion<()>);

    /// Advance animations.
    fn tick(&mut self, _now: Instant) {}

    /// Rect (row-local) to reveal when the panel opens.
    fn initial_focus_rect(&self) -> Option<Rect> {
        None
    }

    fn apply_theme(&mut self, theme: &dyn MenuTheme);

    /// Handle used to request a relayout after a size change.
    fn set_layout_invalidator(&mut self, _invalidator: LayoutInvalidator) {}

    /// Append draw commands for a row occupying `frame`.
    fn draw(&self, frame: Rect, out: &mut DisplayList);
}

/// Relayout request flag shared between the panel and its rows.
#[derive(Debug, Clone, Default)]
pub struct LayoutInvalidator {
    dirty: Rc<Cell<bool>>,
}

impl LayoutInvalidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self) {
        self.dirty.set(true);
    }

    /// Read and clear the request.
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
}

// ---------------------------------------------------------------------------
// ActionItem
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f64 = 44.0;
const ROW_PADDING: f64 = 16.0;
const SHORTCUT_GAP: f64 = 24.0;
/// Selection blink: off for the first half, back on for the second.
const SELECTION_BLINK: Duration = Duration::from_millis(160);

/// A titled row that runs a closure when selected.
#[derive(Clone)]
pub struct ActionItem {
    name: String,
    shortcut: Option<String>,
    action: Rc<dyn Fn()>,
}

impl ActionItem {
    pub fn new(name: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            name: name.into(),
            shortcut: None,
            action: Rc::new(action),
        }
    }

    /// Show a shortcut label (display only).
    #[must_use]
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("name", &self.name)
            .field("shortcut", &self.shortcut)
            .finish_non_exhaustive()
    }
}

impl MenuItem for ActionItem {
    fn view(&self) -> Box<dyn MenuItemView> {
        Box::new(ActionItemView::new(self.name.clone(), self.shortcut.clone()))
    }

    fn perform_action(&self) {
        (self.action)();
    }
}

struct Blink {
    start: Instant,
    done: Completion<()>,
}

/// Row view for [`ActionItem`].
pub struct ActionItemView {
    name: String,
    shortcut: Option<String>,
    font: FontSpec,
    text_color: Rgba,
    highlight_color: Rgba,
    highlighted: bool,
    /// Whether the highlight fill is drawn; blinks off during selection.
    highlight_shown: bool,
    highlight_position: Point,
    blink: Option<Blink>,
}

impl ActionItemView {
    #[must_use]
    pub fn new(name: String, shortcut: Option<String>) -> Self {
        Self {
            name,
            shortcut,
            font: FontSpec::default(),
            text_color: Rgba::BLACK,
            highlight_color: Rgba::TRANSPARENT,
            highlighted: false,
            highlight_shown: false,
            highlight_position: Point::INFINITY,
            blink: None,
        }
    }

    #[must_use]
    pub fn highlight_position(&self) -> Point {
        self.highlight_position
    }

    fn text_width(&self, text: &str) -> f64 {
        // Average advance; hosts with real metrics supply their own view.
        text.chars().count() as f64 * self.font.size * 0.55
    }
}

impl MenuItemView for ActionItemView {
    fn preferred_size(&self) -> Size {
        let mut width = ROW_PADDING * 2.0 + self.text_width(&self.name);
        if let Some(s) = &self.shortcut {
            width += SHORTCUT_GAP + self.text_width(s);
        }
        Size::new(width.ceil(), ROW_HEIGHT)
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        if self.blink.is_none() {
            self.highlight_shown = highlighted;
        }
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    fn set_highlight_position(&mut self, local: Point) {
        self.highlight_position = local;
    }

    fn start_selection_animation(&mut self, now: Instant, done: Completion<()>) {
        self.highlight_shown = false;
        self.blink = Some(Blink { start: now, done });
    }

    fn tick(&mut self, now: Instant) {
        let Some(blink) = &self.blink else {
            return;
        };
        let elapsed = now.saturating_duration_since(blink.start);
        self.highlight_shown = elapsed >= SELECTION_BLINK / 2;
        if elapsed >= SELECTION_BLINK {
            if let Some(blink) = self.blink.take() {
                blink.done.done();
            }
            self.highlight_shown = self.highlighted;
        }
    }

    fn apply_theme(&mut self, theme: &dyn MenuTheme) {
        self.font = theme.font().clone();
        self.text_color = theme.text_color();
        self.highlight_color = theme.highlight_color();
    }

    fn draw(&self, frame: Rect, out: &mut DisplayList) {
        if self.highlight_shown {
            out.push(DrawCommand::Fill {
                rect: frame,
                color: self.highlight_color,
                corner_radius: 0.0,
            });
        }
        let inner = Rect::new(
            frame.x + ROW_PADDING,
            frame.y,
            (frame.width - ROW_PADDING * 2.0).max(0.0),
            frame.height,
        );
        out.push(DrawCommand::Text {
            text: self.name.clone(),
            frame: inner,
            font: self.font.clone(),
            color: self.text_color,
        });
        if let Some(shortcut) = &self.shortcut {
            let w = self.text_width(shortcut).ceil().min(inner.width);
            out.push(DrawCommand::Text {
                text: shortcut.clone(),
                frame: Rect::new(inner.max_x() - w, inner.y, w, inner.height),
                font: self.font.clone(),
                color: self.text_color.with_alpha_scaled(0.5),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// SeparatorItem
// ---------------------------------------------------------------------------

const SEPARATOR_HEIGHT: f64 = 9.0;

/// A hairline between groups of rows. Never highlights or selects.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorItem;

impl MenuItem for SeparatorItem {
    fn view(&self) -> Box<dyn MenuItemView> {
        Box::new(SeparatorView {
            color: Rgba::TRANSPARENT,
        })
    }

    fn perform_action(&self) {}
}

struct SeparatorView {
    color: Rgba,
}

impl MenuItemView for SeparatorView {
    fn preferred_size(&self) -> Size {
        Size::new(0.0, SEPARATOR_HEIGHT)
    }

    fn contains(&self, _local: Point, _size: Size) -> bool {
        false
    }

    fn set_highlighted(&mut self, _highlighted: bool) {}

    fn is_highlighted(&self) -> bool {
        false
    }

    fn start_selection_animation(&mut self, _now: Instant, done: Completion<()>) {
        done.done();
    }

    fn apply_theme(&mut self, theme: &dyn MenuTheme) {
        self.color = theme.separator_color();
    }

    fn draw(&self, frame: Rect, out: &mut DisplayList) {
        out.push(DrawCommand::Fill {
            rect: Rect::new(frame.x, frame.mid_y().floor(), frame.width, 1.0),
            color: self.color,
            corner_radius: 0.0,
        });
    }
}
