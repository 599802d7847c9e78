#![forbid(unsafe_code)]

//! Rounded rectangles with per-corner rounding.

use std::f64::consts::{FRAC_PI_2, PI};

use bitflags::bitflags;
use popmenu_core::geometry::{Point, Rect};

use crate::path::OutlinePath;

bitflags! {
    /// Which corners of a rectangle are rounded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Corners: u8 {
        const TOP_LEFT = 0b0001;
        const TOP_RIGHT = 0b0010;
        const BOTTOM_LEFT = 0b0100;
        const BOTTOM_RIGHT = 0b1000;

        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

/// Build a closed, clockwise rounded rectangle.
///
/// The radius is clamped to half the smaller side, so degenerate rectangles
/// still produce a closed (possibly zero-area) subpath.
pub fn rounded_rect(rect: Rect, corners: Corners, radius: f64) -> OutlinePath {
    let r = radius
        .min(rect.width / 2.0)
        .min(rect.height / 2.0)
        .max(0.0);
    let pick = |corner: Corners| if corners.contains(corner) { r } else { 0.0 };
    let tl = pick(Corners::TOP_LEFT);
    let tr = pick(Corners::TOP_RIGHT);
    let bl = pick(Corners::BOTTOM_LEFT);
    let br = pick(Corners::BOTTOM_RIGHT);

    let (min_x, min_y, max_x, max_y) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());

    let mut path = OutlinePath::new();
    path.move_to(Point::new(min_x + tl, min_y));
    path.line_to(Point::new(max_x - tr, min_y));
    if tr > 0.0 {
        path.arc(Point::new(max_x - tr, min_y + tr), tr, 1.5 * PI, 0.0, true);
    }
    path.line_to(Point::new(max_x, max_y - br));
    if br > 0.0 {
        path.arc(Point::new(max_x - br, max_y - br), br, 0.0, FRAC_PI_2, true);
    }
    path.line_to(Point::new(min_x + bl, max_y));
    if bl > 0.0 {
        path.arc(Point::new(min_x + bl, max_y - bl), bl, FRAC_PI_2, PI, true);
    }
    path.line_to(Point::new(min_x, min_y + tl));
    if tl > 0.0 {
        path.arc(Point::new(min_x + tl, min_y + tl), tl, PI, 1.5 * PI, true);
    }
    path.close();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_corners_reach_the_corner_point() {
        let path = rounded_rect(Rect::new(0.0, 0.0, 40.0, 20.0), Corners::empty(), 8.0);
        assert!(path.contains(Point::new(0.5, 0.5)));
        assert!(path.contains(Point::new(39.5, 19.5)));
    }

    #[test]
    fn rounded_corners_cut_the_corner_point() {
        let path = rounded_rect(Rect::new(0.0, 0.0, 40.0, 20.0), Corners::TOP, 8.0);
        assert!(!path.contains(Point::new(0.5, 0.5)));
        assert!(!path.contains(Point::new(39.5, 0.5)));
        assert!(path.contains(Point::new(0.5, 19.5)));
        assert!(path.contains(Point::new(20.0, 10.0)));
    }

    #[test]
    fn radius_clamps_to_half_the_short_side() {
        let path = rounded_rect(Rect::new(0.0, 0.0, 40.0, 6.0), Corners::ALL, 8.0);
        let area = path.signed_area();
        let pill = 34.0 * 6.0 + std::f64::consts::PI * 9.0;
        assert!((area - pill).abs() < 0.05, "area {area} vs {pill}");
    }

    #[test]
    fn zero_height_rect_is_still_closed() {
        let path = rounded_rect(Rect::new(0.0, 10.0, 40.0, 0.0), Corners::ALL, 8.0);
        assert!(path.is_closed());
        assert_eq!(path.subpath_count(), 1);
    }

    #[test]
    fn corner_sets_compose() {
        assert_eq!(Corners::TOP | Corners::BOTTOM, Corners::ALL);
        assert!(Corners::ALL.contains(Corners::BOTTOM_RIGHT));
    }
}
