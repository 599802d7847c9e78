#![forbid(unsafe_code)]

//! Outline path model.
//!
//! [`OutlinePath`] is a sequence of move/line/arc/close elements that may
//! contain several closed subpaths. Arcs follow the y-down convention of
//! [`popmenu_core::geometry`]: angle `0` points right, `PI / 2` points down,
//! and a clockwise arc sweeps toward increasing angles.
//!
//! Containment, area, and bounds are computed by flattening into a
//! [`kurbo::BezPath`] and applying the non-zero winding rule.

use std::f64::consts::TAU;

use kurbo::Shape;
use popmenu_core::geometry::{Point, Rect, Vector};

/// Tolerance used when approximating arcs with cubic curves.
const ARC_TOLERANCE: f64 = 0.01;

/// A circular arc segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Clockwise on screen (toward increasing angles).
    pub clockwise: bool,
}

impl ArcSegment {
    #[must_use]
    pub const fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Signed sweep in radians, normalised to the arc's direction.
    ///
    /// Clockwise arcs sweep in `[0, TAU)`, counter-clockwise arcs in
    /// `(-TAU, 0]`.
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        if self.clockwise {
            raw.rem_euclid(TAU)
        } else {
            -(-raw).rem_euclid(TAU)
        }
    }

    fn to_kurbo(self) -> kurbo::Arc {
        kurbo::Arc {
            center: to_kurbo_point(self.center),
            radii: kurbo::Vec2::new(self.radius, self.radius),
            start_angle: self.start_angle,
            sweep_angle: self.sweep(),
            x_rotation: 0.0,
        }
    }

    #[must_use]
    fn translated(self, v: Vector) -> Self {
        Self {
            center: self.center.offset(v),
            ..self
        }
    }
}

/// One element of an outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// An arc; a straight line joins the current point to the arc's start.
    Arc(ArcSegment),
    Close,
}

/// A closed, possibly multi-subpath boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlinePath {
    elements: Vec<PathElement>,
}

impl OutlinePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.elements.push(PathElement::LineTo(p));
        self
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> &mut Self {
        self.elements.push(PathElement::Arc(ArcSegment::new(
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        )));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    /// Append every subpath of `other`.
    pub fn append(&mut self, other: &OutlinePath) -> &mut Self {
        self.elements.extend_from_slice(&other.elements);
        self
    }

    #[inline]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of subpaths (one per `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PathElement::MoveTo(_)))
            .count()
    }

    /// Whether every subpath ends with `Close`.
    pub fn is_closed(&self) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        let mut open = false;
        for element in &self.elements {
            match element {
                PathElement::MoveTo(_) => {
                    if open {
                        return false;
                    }
                    open = true;
                }
                PathElement::Close => open = false,
                PathElement::LineTo(_) | PathElement::Arc(_) => {
                    if !open {
                        return false;
                    }
                }
            }
        }
        !open
    }

    /// A copy of this path moved by `v`.
    #[must_use]
    pub fn translated(&self, v: Vector) -> OutlinePath {
        let elements = self
            .elements
            .iter()
            .map(|element| match *element {
                PathElement::MoveTo(p) => PathElement::MoveTo(p.offset(v)),
                PathElement::LineTo(p) => PathElement::LineTo(p.offset(v)),
                PathElement::Arc(arc) => PathElement::Arc(arc.translated(v)),
                PathElement::Close => PathElement::Close,
            })
            .collect();
        OutlinePath { elements }
    }

    /// Flatten into a kurbo path with arcs approximated by cubics.
    pub fn to_bez_path(&self) -> kurbo::BezPath {
        let mut bez = kurbo::BezPath::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) => {
                    bez.move_to(to_kurbo_point(p));
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathElement::LineTo(p) => {
                    if current.is_none() {
                        bez.move_to(to_kurbo_point(p));
                        subpath_start = Some(p);
                    } else {
                        bez.line_to(to_kurbo_point(p));
                    }
                    current = Some(p);
                }
                PathElement::Arc(arc) => {
                    let start = arc.start_point();
                    match current {
                        None => {
                            bez.move_to(to_kurbo_point(start));
                            subpath_start = Some(start);
                        }
                        Some(at) if at.distance(start) > f64::EPSILON => {
                            bez.line_to(to_kurbo_point(start));
                        }
                        Some(_) => {}
                    }
                    bez.extend(arc.to_kurbo().append_iter(ARC_TOLERANCE));
                    current = Some(arc.end_point());
                }
                PathElement::Close => {
                    bez.close_path();
                    current = subpath_start;
                }
            }
        }
        bez
    }

    /// Non-zero winding containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.to_bez_path().contains(to_kurbo_point(p))
    }

    /// Winding number at `p`.
    pub fn winding(&self, p: Point) -> i32 {
        self.to_bez_path().winding(to_kurbo_point(p))
    }

    /// Signed area; positive for clockwise-on-screen subpaths.
    pub fn signed_area(&self) -> f64 {
        self.to_bez_path().area()
    }

    /// Filled area, treating each subpath separately regardless of winding.
    pub fn area(&self) -> f64 {
        let mut total = 0.0;
        let mut sub = OutlinePath::new();
        for element in &self.elements {
            if matches!(element, PathElement::MoveTo(_)) && !sub.is_empty() {
                total += sub.signed_area().abs();
                sub.elements.clear();
            }
            sub.elements.push(*element);
        }
        total + sub.signed_area().abs()
    }

    /// Tight bounding box, or `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.elements.is_empty() {
            return None;
        }
        let b = self.to_bez_path().bounding_box();
        Some(Rect::from_edges(b.x0, b.y0, b.x1, b.y1))
    }
}

#[inline]
fn to_kurbo_point(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sweep_normalises_direction() {
        let cw = ArcSegment::new(Point::ZERO, 1.0, 1.5 * PI, 0.0, true);
        assert!(approx(cw.sweep(), FRAC_PI_2));

        let ccw = ArcSegment::new(Point::ZERO, 1.0, PI, FRAC_PI_2, false);
        assert!(approx(ccw.sweep(), -FRAC_PI_2));

        let ccw_wrap = ArcSegment::new(Point::ZERO, 1.0, FRAC_PI_2, 0.0, false);
        assert!(approx(ccw_wrap.sweep(), -FRAC_PI_2));
    }

    #[test]
    fn arc_endpoints_follow_y_down_angles() {
        let arc = ArcSegment::new(Point::new(10.0, 10.0), 5.0, 0.0, FRAC_PI_2, true);
        let s = arc.start_point();
        let e = arc.end_point();
        assert!(approx(s.x, 15.0) && approx(s.y, 10.0));
        assert!(approx(e.x, 10.0) && approx(e.y, 15.0));
    }

    #[test]
    fn closed_square_contains_interior() {
        let mut path = OutlinePath::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 10.0))
            .line_to(Point::new(0.0, 10.0))
            .close();
        assert!(path.is_closed());
        assert_eq!(path.subpath_count(), 1);
        assert!(path.contains(Point::new(5.0, 5.0)));
        assert!(!path.contains(Point::new(15.0, 5.0)));
        assert!(approx(path.signed_area().abs(), 100.0));
    }

    #[test]
    fn area_ignores_subpath_direction() {
        let mut path = OutlinePath::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 10.0))
            .close();
        path.move_to(Point::new(20.0, 0.0))
            .line_to(Point::new(20.0, 10.0))
            .line_to(Point::new(30.0, 10.0))
            .close();
        assert!(approx(path.signed_area(), 0.0));
        assert!(approx(path.area(), 100.0));
    }

    #[test]
    fn open_subpath_is_not_closed() {
        let mut path = OutlinePath::new();
        path.move_to(Point::ZERO).line_to(Point::new(1.0, 0.0));
        assert!(!path.is_closed());
        assert!(!OutlinePath::new().is_closed());
    }

    #[test]
    fn translate_moves_bounds() {
        let mut path = OutlinePath::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(4.0, 0.0))
            .line_to(Point::new(4.0, 2.0))
            .close();
        let moved = path.translated(Vector::new(20.0, 20.0));
        let b = moved.bounding_box().expect("non-empty");
        assert!(approx(b.x, 20.0) && approx(b.y, 20.0));
        assert!(approx(b.width, 4.0) && approx(b.height, 2.0));
    }

    #[test]
    fn arc_after_gap_inserts_connecting_line() {
        let mut path = OutlinePath::new();
        path.move_to(Point::new(0.0, 0.0))
            .arc(Point::new(10.0, 0.0), 2.0, PI, 1.5 * PI, true)
            .close();
        let bez = path.to_bez_path();
        let first_two: Vec<_> = bez.elements().iter().take(2).collect();
        assert!(matches!(first_two[1], kurbo::PathEl::LineTo(p) if approx(p.x, 8.0)));
    }
}
