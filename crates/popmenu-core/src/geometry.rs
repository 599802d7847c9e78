#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are logical points in a y-down space: the origin sits at
//! the top-left, `x` grows to the right and `y` grows downward. Angles used
//! by arcs follow the same orientation, so a positive sweep is clockwise on
//! screen.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A location in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// A point that no finite rectangle contains.
    pub const INFINITY: Point = Point {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a vector.
    #[inline]
    #[must_use]
    pub fn offset(self, v: Vector) -> Self {
        Self::new(self.x + v.dx, self.y + v.dy)
    }

    /// Vector from `other` to `self`.
    #[inline]
    pub fn delta_from(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.delta_from(other).length()
    }
}

/// A displacement in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

/// Width and height in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rectangle of this size at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// An axis-aligned rectangle used for frames, bounds, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Build the rectangle spanned by two corner coordinates.
    pub fn from_edges(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same size, origin at zero.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Edges follow the half-open convention: the minimum edges are inside,
    /// the maximum edges are not.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// Translate the rectangle.
    #[inline]
    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow (positive) or shrink (negative) every edge by `amount`.
    #[must_use]
    pub fn outset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Create a new rectangle inside the current one with the given insets.
    #[must_use]
    pub fn inset_by(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.horizontal_sum()).max(0.0),
            (self.height - insets.vertical_sum()).max(0.0),
        )
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.min_x().max(other.min_x());
        let y = self.min_y().max(other.min_y());
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(Rect::from_edges(x, y, right, bottom))
        } else {
            None
        }
    }

    /// Convert a point from the coordinate space this rectangle lives in to
    /// the rectangle's own local space.
    #[inline]
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }

    /// Convert a point from this rectangle's local space to the enclosing space.
    #[inline]
    pub fn from_local(&self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }
}

/// Edge insets for padding and scroll content insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with vertical values only.
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }

    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}
