//! Circle and ellipse detection.

use super::{DetectedShape, meets_min_size};
use crate::config::DetectionThresholds;
use crate::geometry;
use kurbo::Point;

/// Detect an axis-aligned circle or ellipse inscribed in the stroke's bounds.
///
/// Points must stay close to that ellipse on average; squares and rotated
/// squares share a circle's bounding box but bulge out at the corners or
/// pinch in at the edges.
pub fn detect_circle(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    if points.len() < 3 {
        return None;
    }
    let bounds = geometry::bounding_box(points)?;
    if !meets_min_size(bounds, t) {
        log::trace!("Circle rejected: {:.1}x{:.1} too small", bounds.width(), bounds.height());
        return None;
    }

    let center = bounds.center();
    let radius_x = bounds.width() / 2.0;
    let radius_y = bounds.height() / 2.0;

    let deviation = mean_radial_deviation(points, center, radius_x, radius_y);
    if deviation > t.circle_roundness_tolerance {
        log::trace!("Circle rejected: radial deviation {:.3}", deviation);
        return None;
    }

    Some(DetectedShape::Circle {
        center,
        radius_x,
        radius_y,
    })
}

/// Mean of `|r - 1|` where `r` is each point's distance from `center` in
/// radius-normalized coordinates.
fn mean_radial_deviation(points: &[Point], center: Point, radius_x: f64, radius_y: f64) -> f64 {
    let total: f64 = points
        .iter()
        .map(|p| {
            let dx = (p.x - center.x) / radius_x;
            let dy = (p.y - center.y) / radius_y;
            (dx.hypot(dy) - 1.0).abs()
        })
        .sum();
    total / points.len() as f64
}
