#![forbid(unsafe_code)]

//! Render and shadow masks derived from an outline.
//!
//! The render mask clips the panel's background to the silhouette. The
//! shadow mask lives on a canvas outset by `inset` on every side (so blur has
//! room), carries the silhouette translated by `(inset, inset)`, and is
//! inverted: only pixels outside the silhouette let shadow through, which
//! keeps a translucent background from showing its own shadow.

use popmenu_core::geometry::{Point, Rect, Vector};

use crate::path::OutlinePath;

/// Clip mask applied to the panel background.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMask {
    pub path: OutlinePath,
}

impl RenderMask {
    #[must_use]
    pub fn from_outline(path: &OutlinePath) -> Self {
        Self { path: path.clone() }
    }

    /// Whether `p` (panel coordinates) is drawn.
    pub fn is_visible_at(&self, p: Point) -> bool {
        self.path.contains(p)
    }
}

/// Inverted shadow mask synchronised with a [`RenderMask`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowMask {
    /// Silhouette in shadow-canvas coordinates.
    pub path: OutlinePath,
    /// Canvas bounds in shadow-canvas coordinates (origin at zero).
    pub canvas: Rect,
    /// Offset applied to the cast shadow.
    pub offset: Vector,
    /// Distance the canvas extends past the panel on every side.
    pub inset: f64,
}

impl ShadowMask {
    /// Build a shadow mask for a silhouette inside `panel_bounds`.
    #[must_use]
    pub fn from_outline(path: &OutlinePath, panel_bounds: Rect, inset: f64, offset: Vector) -> Self {
        let shift = Vector::new(inset - panel_bounds.x, inset - panel_bounds.y);
        Self {
            path: path.translated(shift),
            canvas: Rect::from_size(
                panel_bounds.width + inset * 2.0,
                panel_bounds.height + inset * 2.0,
            ),
            offset,
            inset,
        }
    }

    /// Canvas frame expressed in panel coordinates.
    pub fn canvas_frame(&self) -> Rect {
        self.canvas.offset_by(-self.inset, -self.inset)
    }

    /// Whether shadow passes through `p` (shadow-canvas coordinates).
    pub fn casts_shadow_at(&self, p: Point) -> bool {
        self.canvas.contains(p) && !self.path.contains(p)
    }
}
