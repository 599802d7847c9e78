#![forbid(unsafe_code)]

//! Widgets: the menu trigger, its popup panel, and their building blocks.
//!
//! # Role in popmenu
//! `popmenu-widgets` is where input, geometry, and time meet. A
//! [`MenuTrigger`] turns pointer events into gestures, opens a
//! [`PopupPanel`] through the shared presentation bus, and forwards drag
//! positions to it. The panel tracks the highlighted row
//! ([`HighlightTracker`]), scrolls near its edges while dragging
//! ([`EdgeAutoscroller`]), and keeps its outline masks in sync with its
//! layout.
//!
//! # Coordinates
//! Triggers receive events in trigger space. Panels work in panel space,
//! whose origin is the top-left of the fused trigger+panel silhouette. See
//! [`layout`] for the conversions.
//!
//! # Rendering
//! Nothing here rasterises. [`MenuTrigger::display_list`] yields a flat
//! [`DisplayList`] that a host renderer replays.

pub mod autoscroll;
pub mod chrome;
pub mod config;
pub mod display;
pub mod highlight;
pub mod item;
pub mod layout;
pub mod panel;
pub mod scroll;
pub mod theme;
pub mod trigger;

pub use autoscroll::{AutoscrollChange, EdgeAutoscroller, ScrollEdge};
pub use chrome::{Title, TriggerChrome};
pub use config::{
    AutoscrollPolicyConfig, ConfigError, GesturePolicyConfig, MenuConfig, PanelPolicyConfig,
};
pub use display::{ContentFade, DisplayList, DrawCommand};
pub use highlight::{HighlightTracker, HighlightUpdate};
pub use item::{ActionItem, LayoutInvalidator, MenuItem, MenuItemView, SeparatorItem};
pub use layout::PanelLayout;
pub use panel::{PanelMasks, PanelPhase, PanelTick, PopupPanel, Selection};
pub use scroll::ScrollState;
pub use theme::{BlurStyle, FontSpec, MenuTheme, Rgba, Theme};
pub use trigger::{DragState, ItemSource, MenuTrigger, TriggerEvent};
