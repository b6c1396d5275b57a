//! Straight line detection.

use super::DetectedShape;
use crate::config::DetectionThresholds;
use crate::geometry;
use kurbo::Point;
use std::f64::consts::{FRAC_PI_2, PI};

/// Detect a straight line from the stroke's first to its last point.
///
/// Near-horizontal and near-vertical results are snapped onto the axis.
pub fn detect_line(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    if points.len() < 3 {
        return None;
    }
    let start = points[0];
    let end = points[points.len() - 1];

    let length = geometry::distance(start, end);
    if !length.is_finite() || length < t.min_line_length {
        log::trace!("Line rejected: length {:.1} below {:.1}", length, t.min_line_length);
        return None;
    }

    let deviation = geometry::max_deviation_ratio(points, start, end)?;
    if !deviation.is_finite() || deviation >= t.line_deviation_ratio {
        log::trace!("Line rejected: deviation ratio {:.3}", deviation);
        return None;
    }

    let (start, end) = snap_to_axis(start, end, t.axis_snap_degrees.to_radians());
    Some(DetectedShape::Line { start, end })
}

/// Straighten a segment onto the nearest axis when within `tolerance` radians of it.
///
/// The off-axis coordinate of both endpoints becomes their average.
pub fn snap_to_axis(start: Point, end: Point, tolerance: f64) -> (Point, Point) {
    // Heading folded into [0, π]; direction of travel does not matter.
    let angle = (end - start).atan2().abs();

    if angle < tolerance || angle > PI - tolerance {
        let y = (start.y + end.y) / 2.0;
        (Point::new(start.x, y), Point::new(end.x, y))
    } else if (angle - FRAC_PI_2).abs() < tolerance {
        let x = (start.x + end.x) / 2.0;
        (Point::new(x, start.y), Point::new(x, end.y))
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::segment;

    fn thresholds() -> DetectionThresholds {
        DetectionThresholds::default()
    }

    #[test]
    fn test_horizontal_line() {
        let points = segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 50);
        assert_eq!(
            detect_line(&points, &thresholds()),
            Some(DetectedShape::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(100.0, 0.0),
            })
        );
    }

    #[test]
    fn test_nearly_vertical_line_snaps() {
        let angle = 89f64.to_radians();
        let end = Point::new(100.0 * angle.cos(), 100.0 * angle.sin());
        let points = segment(Point::new(0.0, 0.0), end, 50);
        match detect_line(&points, &thresholds()) {
            Some(DetectedShape::Line { start, end: snapped }) => {
                assert!((start.x - snapped.x).abs() < 1e-12);
                assert!((start.x - end.x / 2.0).abs() < 1e-9);
                assert!((snapped.y - end.y).abs() < 1e-12);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_points_are_not_a_line() {
        let points = vec![Point::new(f64::NAN, 0.0); 12];
        assert!(detect_line(&points, &thresholds()).is_none());
        let mut points = segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 30);
        points[10].y = f64::NAN;
        assert!(detect_line(&points, &thresholds()).is_none());
    }

    #[test]
    fn test_diagonal_line_is_not_snapped() {
        let points = segment(Point::new(0.0, 0.0), Point::new(80.0, 60.0), 30);
        assert_eq!(
            detect_line(&points, &thresholds()),
            Some(DetectedShape::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(80.0, 60.0),
            })
        );
    }

    #[test]
    fn test_leftward_line_snaps_horizontal() {
        let (start, end) =
            snap_to_axis(Point::new(100.0, 4.0), Point::new(0.0, 0.0), 8f64.to_radians());
        assert_eq!(start, Point::new(100.0, 2.0));
        assert_eq!(end, Point::new(0.0, 2.0));
    }

    #[test]
    fn test_bent_stroke_rejected() {
        let mut points = segment(Point::new(0.0, 0.0), Point::new(50.0, 30.0), 20);
        points.extend(segment(Point::new(50.0, 30.0), Point::new(100.0, 0.0), 20));
        assert!(detect_line(&points, &thresholds()).is_none());
    }

    #[test]
    fn test_short_stroke_rejected() {
        let points = segment(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 10);
        assert!(detect_line(&points, &thresholds()).is_none());
    }

    #[test]
    fn test_two_points_rejected() {
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(detect_line(&points, &thresholds()).is_none());
    }
}
