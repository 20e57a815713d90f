//! Low-level geometry on raw vertex slices.
//!
//! These functions don't know about polygons or units: every vector passed
//! in is assumed to share one unit. `Polygon` converts first, then calls in.
//!
//! ## Rust Lesson #8: References & Slices
//!
//! `&[UnitVector]` is a "slice" - a borrowed view into a contiguous sequence.
//! It works with Vec<UnitVector>, arrays, or any contiguous memory.

use lyon_geom::{LineSegment, point};

use crate::units::UnitVector;

/// A straight edge between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: UnitVector,
    pub end: UnitVector,
}

impl Segment {
    #[inline]
    pub fn new(start: UnitVector, end: UnitVector) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    #[inline]
    pub fn midpoint(&self) -> UnitVector {
        (self.start + self.end) / 2.0
    }

    fn to_lyon(self) -> LineSegment<f64> {
        LineSegment {
            from: point(self.start.x, self.start.y),
            to: point(self.end.x, self.end.y),
        }
    }

    /// Shortest distance from `position` to any point of the segment
    /// (perpendicular when the projection falls inside, endpoint otherwise).
    pub fn distance_to(&self, position: UnitVector) -> f64 {
        if self.length() == 0.0 {
            return (position - self.start).length();
        }
        self.to_lyon().distance_to_point(point(position.x, position.y))
    }

    /// Point of the segment nearest to `position`.
    pub fn closest_point(&self, position: UnitVector) -> UnitVector {
        if self.length() == 0.0 {
            return self.start;
        }
        let p = self.to_lyon().closest_point(point(position.x, position.y));
        UnitVector::new(p.x, p.y, self.start.unit)
    }

    /// Direction of `start -> end` in degrees, clockwise from "up" (0°),
    /// normalized to [0, 360). Up is -y.
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.x.atan2(-d.y).to_degrees().rem_euclid(360.0)
    }
}

/// Arithmetic mean of the vertices, `None` when empty.
pub fn centroid_of_points(points: &[UnitVector]) -> Option<UnitVector> {
    let first = points.first()?;
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Some(UnitVector::new(sum_x / n, sum_y / n, first.unit))
}

/// Bounding box as (min, max) corners.
pub fn bounding_box_of_points(points: &[UnitVector]) -> Option<(UnitVector, UnitVector)> {
    let unit = points.first()?.unit;

    // Iterators! The compiler turns these folds into simple loops.
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some((
        UnitVector::new(min_x, min_y, unit),
        UnitVector::new(max_x, max_y, unit),
    ))
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Returns:
/// - Positive value for counter-clockwise winding (in y-up terms)
/// - Negative value for clockwise winding
///
/// On screen (y-down) the visual winding is flipped.
pub fn signed_area_of_points(points: &[UnitVector]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Test if a position is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(position: UnitVector, polygon: &[UnitVector]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let (px, py) = (position.x, position.y);
    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Vec<UnitVector> {
        vec![
            UnitVector::world(0.0, 0.0),
            UnitVector::world(10.0, 0.0),
            UnitVector::world(10.0, 10.0),
            UnitVector::world(0.0, 10.0),
        ]
    }

    #[test]
    fn segment_length() {
        let seg = Segment::new(UnitVector::world(0.0, 0.0), UnitVector::world(3.0, 4.0));
        assert_eq!(seg.length(), 5.0); // 3-4-5 triangle
        assert_eq!(seg.midpoint(), UnitVector::world(1.5, 2.0));
    }

    #[test]
    fn distance_is_perpendicular_inside_the_span() {
        let seg = Segment::new(UnitVector::world(0.0, 0.0), UnitVector::world(10.0, 0.0));
        assert_abs_diff_eq!(seg.distance_to(UnitVector::world(5.0, 3.0)), 3.0, epsilon = 1e-12);
        let c = seg.closest_point(UnitVector::world(5.0, 3.0));
        assert_abs_diff_eq!(c.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let seg = Segment::new(UnitVector::world(0.0, 0.0), UnitVector::world(10.0, 0.0));
        assert_abs_diff_eq!(seg.distance_to(UnitVector::world(13.0, 4.0)), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_distance() {
        let p = UnitVector::world(2.0, 2.0);
        let seg = Segment::new(p, p);
        assert_eq!(seg.distance_to(UnitVector::world(5.0, 6.0)), 5.0);
        assert_eq!(seg.closest_point(UnitVector::world(5.0, 6.0)), p);
    }

    #[test]
    fn angle_is_clockwise_from_up() {
        let o = UnitVector::world(0.0, 0.0);
        let angle = |x, y| Segment::new(o, UnitVector::world(x, y)).angle();
        assert_abs_diff_eq!(angle(0.0, -1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle(1.0, 0.0), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle(0.0, 1.0), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle(-1.0, 0.0), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle(1.0, -1.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn centroid_and_bbox() {
        let pts = square();
        assert_eq!(centroid_of_points(&pts), Some(UnitVector::world(5.0, 5.0)));
        assert_eq!(
            bounding_box_of_points(&pts),
            Some((UnitVector::world(0.0, 0.0), UnitVector::world(10.0, 10.0)))
        );
        assert_eq!(centroid_of_points(&[]), None);
        assert_eq!(bounding_box_of_points(&[]), None);
    }

    #[test]
    fn signed_area_ccw_positive() {
        let area = signed_area_of_points(&square());
        assert!((area - 100.0).abs() < 1e-10, "10x10 square should have area 100, got {}", area);

        let mut reversed = square();
        reversed.reverse();
        assert!((signed_area_of_points(&reversed) + 100.0).abs() < 1e-10);
    }

    #[test]
    fn point_in_polygon_basic() {
        let pts = square();
        assert!(point_in_polygon(UnitVector::world(5.0, 5.0), &pts));
        assert!(!point_in_polygon(UnitVector::world(15.0, 5.0), &pts));
        assert!(!point_in_polygon(UnitVector::world(5.0, 5.0), &pts[..2]));
    }
}
