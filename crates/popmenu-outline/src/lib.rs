#![forbid(unsafe_code)]

//! Outline engine: the fused trigger/panel silhouette.
//!
//! # Role in popmenu
//! `popmenu-outline` is pure geometry. Given a trigger size, the panel
//! bounds, an [`Alignment`], and a corner radius it produces the
//! [`OutlinePath`] used to mask the panel background and cast its shadow.
//! Nothing here holds state or touches a renderer.

pub mod engine;
pub mod mask;
pub mod path;
pub mod rounded_rect;

pub use engine::{
    Alignment, HorizontalAlignment, OutlineParts, VerticalAlignment, compute_outline,
    compute_outline_parts, panel_corners, place_trigger, trigger_corners,
};
pub use mask::{RenderMask, ShadowMask};
pub use path::{ArcSegment, OutlinePath, PathElement};
pub use rounded_rect::{Corners, rounded_rect};
