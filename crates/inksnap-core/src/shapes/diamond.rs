//! Diamond (square rotated 45°) detection.

use super::{DetectedShape, meets_min_size};
use crate::config::DetectionThresholds;
use crate::geometry;
use kurbo::Point;

/// Detect a diamond from the stroke's extreme points.
///
/// A diamond's topmost and bottommost points sit on the vertical center line
/// and its leftmost and rightmost points on the horizontal one. A rectangle's
/// extremes run along whole edges instead.
pub fn detect_diamond(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    if points.len() < 4 {
        return None;
    }
    let bounds = geometry::bounding_box(points)?;
    if !meets_min_size(bounds, t) {
        log::trace!("Diamond rejected: {:.1}x{:.1} too small", bounds.width(), bounds.height());
        return None;
    }

    let center = bounds.center();
    let x_tolerance = t.diamond_center_tolerance * bounds.width() / 2.0;
    let y_tolerance = t.diamond_center_tolerance * bounds.height() / 2.0;

    let top = extreme(points, |a, b| a.y < b.y);
    let bottom = extreme(points, |a, b| a.y > b.y);
    let left = extreme(points, |a, b| a.x < b.x);
    let right = extreme(points, |a, b| a.x > b.x);

    let centered = [top, bottom]
        .iter()
        .filter(|p| (p.x - center.x).abs() <= x_tolerance)
        .count()
        + [left, right]
            .iter()
            .filter(|p| (p.y - center.y).abs() <= y_tolerance)
            .count();
    if centered < t.diamond_min_centered_extremes {
        log::trace!("Diamond rejected: {} centered extremes", centered);
        return None;
    }

    let fill = geometry::fill_ratio(points, bounds)?;
    if fill > t.diamond_max_fill {
        log::trace!("Diamond rejected: fills {:.2} of its bounds", fill);
        return None;
    }

    Some(DetectedShape::Diamond {
        center,
        width: bounds.width(),
        height: bounds.height(),
    })
}

/// First point that no later point beats; `beats(a, b)` means `a` is more extreme.
fn extreme(points: &[Point], beats: impl Fn(&Point, &Point) -> bool) -> Point {
    points
        .iter()
        .skip(1)
        .fold(points[0], |best, p| if beats(p, &best) { *p } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::{ellipse, polygon, rotated_square, square};

    #[test]
    fn test_rotated_square() {
        assert_eq!(
            detect_diamond(&rotated_square(), &DetectionThresholds::default()),
            Some(DetectedShape::Diamond {
                center: Point::new(50.0, 50.0),
                width: 100.0,
                height: 100.0,
            })
        );
    }

    #[test]
    fn test_tall_diamond() {
        let points = polygon(
            &[
                Point::new(60.0, 0.0),
                Point::new(100.0, 80.0),
                Point::new(60.0, 160.0),
                Point::new(20.0, 80.0),
            ],
            15,
        );
        assert_eq!(
            detect_diamond(&points, &DetectionThresholds::default()),
            Some(DetectedShape::Diamond {
                center: Point::new(60.0, 80.0),
                width: 80.0,
                height: 160.0,
            })
        );
    }

    #[test]
    fn test_axis_aligned_square_rejected() {
        let points = square(0.0, 0.0, 100.0);
        assert!(detect_diamond(&points, &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_circle_rejected_by_fill() {
        let points = ellipse(Point::new(50.0, 50.0), 50.0, 50.0, 48);
        assert!(detect_diamond(&points, &DetectionThresholds::default()).is_none());
    }

    #[test]
    fn test_minimum_size() {
        let points = polygon(
            &[
                Point::new(15.0, 0.0),
                Point::new(30.0, 15.0),
                Point::new(15.0, 30.0),
                Point::new(0.0, 15.0),
            ],
            10,
        );
        assert!(detect_diamond(&points, &DetectionThresholds::default()).is_none());
    }
}
