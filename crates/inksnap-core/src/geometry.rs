//! Geometry helpers shared by the detectors.

use kurbo::{Point, Rect, Vec2};
use std::f64::consts::PI;

/// Lengths and areas below this are treated as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Distance from a point to a line segment (a→b).
///
/// A degenerate segment falls back to point-to-point distance.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < GEOMETRY_EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    distance(point, proj)
}

/// Axis-aligned bounding box of a point set.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut bounds = Rect::from_points(*first, *first);
    for point in &points[1..] {
        bounds = bounds.union_pt(*point);
    }
    Some(bounds)
}

/// Length of the bounding box diagonal.
pub fn diagonal(bounds: Rect) -> f64 {
    bounds.width().hypot(bounds.height())
}

/// Perimeter of the closed polygon through `points` (including the closing edge).
pub fn polygon_perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
    open + distance(points[points.len() - 1], points[0])
}

/// Unsigned shoelace area of the closed polygon through `points`.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}

/// Circularity `perimeter² / (4π·area)`; 1.0 for a circle.
///
/// Returns `None` for polygons without area.
pub fn circularity(points: &[Point]) -> Option<f64> {
    let area = polygon_area(points);
    if area < GEOMETRY_EPSILON {
        return None;
    }
    let perimeter = polygon_perimeter(points);
    Some(perimeter * perimeter / (4.0 * PI * area))
}

/// Fraction of the bounding box covered by the polygon through `points`.
pub fn fill_ratio(points: &[Point], bounds: Rect) -> Option<f64> {
    let box_area = bounds.area();
    if box_area < GEOMETRY_EPSILON {
        return None;
    }
    Some(polygon_area(points) / box_area)
}

/// Largest distance of any point from the segment a→b, divided by the segment length.
pub fn max_deviation_ratio(points: &[Point], a: Point, b: Point) -> Option<f64> {
    let length = distance(a, b);
    if length < GEOMETRY_EPSILON {
        return None;
    }
    let mut max_dev = 0.0_f64;
    for p in points {
        let d = point_to_segment_dist(*p, a, b);
        if !d.is_finite() {
            return None;
        }
        max_dev = max_dev.max(d);
    }
    Some(max_dev / length)
}

/// Whether the stroke returns close enough to its start to count as closed.
pub fn is_closed(points: &[Point], closure_ratio: f64) -> bool {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return false;
    };
    let Some(bounds) = bounding_box(points) else {
        return false;
    };
    let diag = diagonal(bounds);
    if diag < GEOMETRY_EPSILON {
        return false;
    }
    distance(*first, *last) < closure_ratio * diag
}

/// Unit vector from `from` toward `to`, or `None` when they coincide.
pub fn direction(from: Point, to: Point) -> Option<Vec2> {
    let v = to - from;
    let len = v.hypot();
    if len < GEOMETRY_EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Rotate a vector counter-clockwise (in y-up terms) by `angle` radians.
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Absolute angle between two directions, in `[0, π]`.
pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
    a.cross(b).abs().atan2(a.dot(b))
}

/// Change in heading between two consecutive directions, normalized into `[0, π]`.
pub fn turn_angle(incoming: Vec2, outgoing: Vec2) -> f64 {
    let mut diff = (outgoing.atan2() - incoming.atan2()).abs();
    if diff > PI {
        diff = 2.0 * PI - diff;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_to_segment_projection_is_clamped() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        // Past the end: distance to the endpoint, not the infinite line.
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_to_degenerate_segment() {
        let a = Point::new(2.0, 2.0);
        let d = point_to_segment_dist(Point::new(5.0, 6.0), a, a);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        assert!(bounding_box(&[]).is_none());
        let bounds = bounding_box(&[Point::new(5.0, -1.0), Point::new(-2.0, 7.0)]).unwrap();
        assert_eq!(bounds, Rect::new(-2.0, -1.0, 5.0, 7.0));
    }

    #[test]
    fn test_perimeter_and_area() {
        let square = unit_square();
        assert!((polygon_perimeter(&square) - 40.0).abs() < 1e-12);
        assert!((polygon_area(&square) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_circularity_of_square() {
        let c = circularity(&unit_square()).unwrap();
        assert!((c - 4.0 / PI).abs() < 1e-9);
    }

    #[test]
    fn test_circularity_without_area() {
        let collinear = [Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0)];
        assert!(circularity(&collinear).is_none());
    }

    #[test]
    fn test_deviation_ratio_of_zero_length_segment() {
        let p = Point::new(1.0, 1.0);
        assert!(max_deviation_ratio(&[p], p, p).is_none());
    }

    #[test]
    fn test_deviation_ratio_with_nan_point() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(max_deviation_ratio(&[a, Point::new(5.0, f64::NAN), b], a, b).is_none());
    }

    #[test]
    fn test_is_closed() {
        let mut square = unit_square();
        square.push(Point::new(0.0, 1.0));
        assert!(is_closed(&square, 0.2));
        let open = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!is_closed(&open, 0.2));
        assert!(!is_closed(&[Point::new(3.0, 3.0); 4], 0.2));
    }

    #[test]
    fn test_turn_angle_wraps() {
        let a = Vec2::from_angle(170f64.to_radians());
        let b = Vec2::from_angle(-170f64.to_radians());
        assert!((turn_angle(a, b).to_degrees() - 20.0).abs() < 1e-9);
    }
}
