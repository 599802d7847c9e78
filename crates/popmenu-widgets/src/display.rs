#![forbid(unsafe_code)]

//! Display list handed to a host renderer.
//!
//! Widgets describe what to draw as a flat list of [`DrawCommand`]s in
//! trigger-local coordinates. Rasterisation, blur, and text shaping belong
//! to the host. Clips and layers nest: every `PushClip` is balanced by a
//! `PopClip` and every `PushLayer` by a `PopLayer`.

use popmenu_core::geometry::{Point, Rect, Vector};
use popmenu_outline::OutlinePath;

use crate::theme::{BlurStyle, FontSpec, Rgba};

/// Vertical alpha ramp applied to a clipped region.
///
/// `stops` are `(fraction, alpha)` pairs over `[0, height]` measured from
/// the top of the clip; below `height` the region is fully opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFade {
    pub height: f64,
    pub stops: [(f64, f32); 3],
}

impl ContentFade {
    /// Transparent over the first 72% of `height`, opaque at `height`.
    #[must_use]
    pub fn top_edge(height: f64) -> Self {
        Self {
            height,
            stops: [(0.0, 0.0), (0.72, 0.0), (1.0, 1.0)],
        }
    }

    /// Opacity at `y`, measured from the top of the faded region.
    #[must_use]
    pub fn alpha_at(&self, y: f64) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        let t = y / self.height;
        let [first, .., last] = self.stops;
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.stops.windows(2) {
            let ((t0, a0), (t1, a1)) = (pair[0], pair[1]);
            if t <= t1 {
                if t1 <= t0 {
                    return a1;
                }
                let k = ((t - t0) / (t1 - t0)) as f32;
                return a0 + (a1 - a0) * k;
            }
        }
        last.1
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Shadow cast by `path`, visible only outside `path` within `canvas`.
    Shadow {
        path: OutlinePath,
        canvas: Rect,
        offset: Vector,
        color: Rgba,
        opacity: f32,
        radius: f64,
    },
    /// Blurred, tinted backdrop clipped to `path`.
    Backdrop {
        path: OutlinePath,
        blur: BlurStyle,
        tint: Rgba,
    },
    /// Solid (optionally rounded) rectangle.
    Fill {
        rect: Rect,
        color: Rgba,
        corner_radius: f64,
    },
    /// Single-line text centred in `frame`.
    Text {
        text: String,
        frame: Rect,
        font: FontSpec,
        color: Rgba,
    },
    /// Named image fitted into `frame`.
    Image { name: String, frame: Rect },
    PushClip {
        rect: Rect,
        fade: Option<ContentFade>,
    },
    PopClip,
    /// Composite everything up to the matching `PopLayer` at `alpha`.
    PushLayer { alpha: f32 },
    PopLayer,
}

impl DrawCommand {
    fn translated(mut self, v: Vector) -> Self {
        let shift = |r: &mut Rect| *r = r.offset_by(v.dx, v.dy);
        match &mut self {
            Self::Shadow { path, canvas, .. } => {
                *path = path.translated(v);
                shift(canvas);
            }
            Self::Backdrop { path, .. } => *path = path.translated(v),
            Self::Fill { rect, .. } | Self::PushClip { rect, .. } => shift(rect),
            Self::Text { frame, .. } | Self::Image { frame, .. } => shift(frame),
            Self::PopClip | Self::PushLayer { .. } | Self::PopLayer => {}
        }
        self
    }
}

/// Ordered draw commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append `other`, translated by `offset`.
    pub fn extend_translated(&mut self, other: DisplayList, offset: Vector) {
        self.commands
            .extend(other.commands.into_iter().map(|c| c.translated(offset)));
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether clips and layers are properly nested.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut stack = Vec::new();
        for c in &self.commands {
            match c {
                DrawCommand::PushClip { .. } => stack.push(true),
                DrawCommand::PushLayer { .. } => stack.push(false),
                DrawCommand::PopClip => {
                    if stack.pop() != Some(true) {
                        return false;
                    }
                }
                DrawCommand::PopLayer => {
                    if stack.pop() != Some(false) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Text of the first text command whose frame contains `p`.
#[must_use]
pub fn text_at(list: &DisplayList, p: Point) -> Option<&str> {
    list.iter().find_map(|c| match c {
        DrawCommand::Text { text, frame, .. } if frame.contains(p) => Some(text.as_str()),
        _ => None,
    })
}
