#![forbid(unsafe_code)]

//! popmenu public facade crate.
//!
//! Re-exports the types an application needs to put a popup menu on screen
//! and offers a prelude for day-to-day use.
//!
//! ```no_run
//! use std::rc::Rc;
//! use popmenu::prelude::*;
//!
//! let bus = PresentationBus::new();
//! let mut trigger = MenuTrigger::new(
//!     Title::text("Edit"),
//!     Rc::new(Theme::light()),
//!     &bus,
//!     MenuConfig::default(),
//! )
//! .with_frame(Rect::new(0.0, 0.0, 80.0, 40.0))
//! .with_items(|| vec![Rc::new(ActionItem::new("Undo", || {})) as Rc<dyn MenuItem>]);
//!
//! let t = Instant::now();
//! let events = trigger.handle_pointer(&PointerEvent::down(Point::new(40.0, 20.0), t));
//! assert_eq!(events, vec![TriggerEvent::Opened]);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use popmenu_core::event::{PointerEvent, PointerPhase};
pub use popmenu_core::geometry::{Insets, Point, Rect, Size, Vector};
pub use popmenu_core::gesture::{GestureConfig, GestureEvent, GestureRecognizer, SimultaneousPolicy};
pub use popmenu_core::{Duration, Instant};

// --- Outline re-exports ----------------------------------------------------

pub use popmenu_outline::{
    Alignment, Corners, HorizontalAlignment, OutlinePath, RenderMask, ShadowMask,
    VerticalAlignment, compute_outline,
};

// --- Runtime re-exports ----------------------------------------------------

pub use popmenu_runtime::{PresentationBus, Subscription, TriggerId};

// --- Widget re-exports -----------------------------------------------------

pub use popmenu_widgets::{
    ActionItem, BlurStyle, ConfigError, DisplayList, DrawCommand, FontSpec, MenuConfig, MenuItem,
    MenuItemView, MenuTheme, MenuTrigger, PanelPhase, PopupPanel, Rgba, SeparatorItem, Theme,
    Title, TriggerChrome, TriggerEvent,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionItem, Alignment, HorizontalAlignment, Instant, MenuConfig, MenuItem, MenuTheme,
        MenuTrigger, Point, PointerEvent, PresentationBus, Rect, SeparatorItem, Theme, Title,
        TriggerEvent, VerticalAlignment,
    };

    pub use crate::{core, outline, runtime, widgets};
}

pub use popmenu_core as core;
pub use popmenu_outline as outline;
pub use popmenu_runtime as runtime;
pub use popmenu_widgets as widgets;
