//! Triangle detection.

use super::{DetectedShape, meets_min_size};
use crate::config::DetectionThresholds;
use crate::corners;
use crate::geometry::{self, GEOMETRY_EPSILON};
use kurbo::Point;

/// Detect a triangle from exactly three corners.
pub fn detect_triangle(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    if points.len() < 3 {
        return None;
    }
    let bounds = geometry::bounding_box(points)?;
    if !meets_min_size(bounds, t) {
        log::trace!("Triangle rejected: {:.1}x{:.1} too small", bounds.width(), bounds.height());
        return None;
    }

    let mut found = corners::find_triangle_corners(points, t);
    if found.len() != 3 {
        log::trace!("Triangle rejected: {} corners", found.len());
        return None;
    }
    // Keep the drawing order of the vertices.
    found.sort_by_key(|c| c.index);
    let vertices = [found[0].point, found[1].point, found[2].point];

    let sides = [
        geometry::distance(vertices[0], vertices[1]),
        geometry::distance(vertices[1], vertices[2]),
        geometry::distance(vertices[2], vertices[0]),
    ];
    let longest = sides.iter().copied().fold(0.0, f64::max);
    let shortest = sides.iter().copied().fold(f64::INFINITY, f64::min);
    if longest < GEOMETRY_EPSILON || shortest < t.triangle_min_side_ratio * longest {
        log::trace!("Triangle rejected: sides {:?}", sides);
        return None;
    }
    if geometry::polygon_area(&vertices) < GEOMETRY_EPSILON {
        return None;
    }

    Some(DetectedShape::Triangle { vertices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::polygon;

    #[test]
    fn test_equilateral_triangle() {
        let corners = [
            Point::new(50.0, 0.0),
            Point::new(100.0, 86.6),
            Point::new(0.0, 86.6),
        ];
        assert_eq!(
            detect_triangle(&polygon(&corners, 30), &DetectionThresholds::default()),
            Some(DetectedShape::Triangle { vertices: corners })
        );
    }

    #[test]
    fn test_right_triangle() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(120.0, 0.0),
            Point::new(0.0, 90.0),
        ];
        let detected = detect_triangle(&polygon(&corners, 30), &DetectionThresholds::default());
        assert_eq!(detected, Some(DetectedShape::Triangle { vertices: corners }));
    }

    #[test]
    fn test_sliver_rejected() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 25.0),
        ];
        assert!(detect_triangle(&polygon(&corners, 30), &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_minimum_size() {
        let corners = [
            Point::new(15.0, 0.0),
            Point::new(30.0, 26.0),
            Point::new(0.0, 26.0),
        ];
        assert!(detect_triangle(&polygon(&corners, 30), &DetectionThresholds::default()).is_none());
    }
}
