#![forbid(unsafe_code)]

//! Trigger chrome: title, image, and gesture bar placement.
//!
//! The trigger is a rounded, blurred pill showing either a text title or an
//! image, plus a small gesture bar on the edge the panel grows from. While a
//! panel is open the panel redraws the title in the trigger's place and the
//! trigger's own backdrop is hidden.

use popmenu_core::geometry::{Rect, Size};
use popmenu_outline::{Corners, VerticalAlignment, rounded_rect};

use crate::display::{DisplayList, DrawCommand};
use crate::theme::{MenuTheme, Rgba};

const TITLE_INSET: f64 = 12.0;
const IMAGE_NEAR_INSET: f64 = 8.0;
const IMAGE_FAR_INSET: f64 = 12.0;
const BAR_SIZE: Size = Size::new(20.0, 2.0);
const BAR_INSET: f64 = 3.0;
const CORNER_RADIUS: f64 = 8.0;

/// What the trigger shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    Text(String),
    /// Image asset name, resolved by the host.
    Image(String),
}

impl Title {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn image(name: impl Into<String>) -> Self {
        Self::Image(name.into())
    }
}

/// Resolved trigger chrome in trigger space.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerChrome {
    pub bounds: Rect,
    pub corner_radius: f64,
    /// Label or image frame.
    pub title_frame: Rect,
    pub gesture_bar: Rect,
    /// False while the trigger's panel is showing.
    pub backdrop_visible: bool,
}

impl TriggerChrome {
    #[must_use]
    pub fn compute(
        size: Size,
        title: &Title,
        vertical: VerticalAlignment,
        backdrop_visible: bool,
    ) -> Self {
        let bounds = size.to_rect();
        let bar_x = bounds.mid_x() - BAR_SIZE.width / 2.0;
        let bar_y = match vertical {
            VerticalAlignment::Bottom => bounds.max_y() - BAR_INSET - BAR_SIZE.height,
            VerticalAlignment::Top => bounds.min_y() + BAR_INSET,
        };
        Self {
            bounds,
            corner_radius: CORNER_RADIUS,
            title_frame: title_frame(title, bounds, vertical),
            gesture_bar: Rect::new(bar_x, bar_y, BAR_SIZE.width, BAR_SIZE.height),
            backdrop_visible,
        }
    }

    /// Draw the trigger. Nothing is drawn while the backdrop is hidden.
    pub fn draw(&self, title: &Title, theme: &dyn MenuTheme, out: &mut DisplayList) {
        if !self.backdrop_visible {
            return;
        }
        out.push(DrawCommand::Backdrop {
            path: rounded_rect(self.bounds, Corners::ALL, self.corner_radius),
            blur: theme.blur_style(),
            tint: theme.background_tint(),
        });
        push_title(title, self.title_frame, theme, theme.dark_tint_color(), out);
        out.push(DrawCommand::Fill {
            rect: self.gesture_bar,
            color: theme.gesture_bar_tint(),
            corner_radius: BAR_SIZE.height / 2.0,
        });
    }
}

/// Frame of the label or image inside `area`.
#[must_use]
pub fn title_frame(title: &Title, area: Rect, vertical: VerticalAlignment) -> Rect {
    let (top, bottom) = match (title, vertical) {
        (Title::Text(_), _) => (0.0, 0.0),
        (Title::Image(_), VerticalAlignment::Bottom) => (IMAGE_NEAR_INSET, IMAGE_FAR_INSET),
        (Title::Image(_), VerticalAlignment::Top) => (IMAGE_FAR_INSET, IMAGE_NEAR_INSET),
    };
    Rect::new(
        area.x + TITLE_INSET,
        area.y + top,
        (area.width - TITLE_INSET * 2.0).max(0.0),
        (area.height - top - bottom).max(0.0),
    )
}

/// Emit the title into `frame`.
pub(crate) fn push_title(
    title: &Title,
    frame: Rect,
    theme: &dyn MenuTheme,
    color: Rgba,
    out: &mut DisplayList,
) {
    match title {
        Title::Text(text) => out.push(DrawCommand::Text {
            text: text.clone(),
            frame,
            font: theme.font().clone(),
            color,
        }),
        Title::Image(name) => out.push(DrawCommand::Image {
            name: name.clone(),
            frame,
        }),
    }
}
