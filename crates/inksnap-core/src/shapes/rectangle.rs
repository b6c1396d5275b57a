//! Axis-aligned rectangle detection.

use super::{DetectedShape, meets_min_size};
use crate::config::DetectionThresholds;
use crate::geometry;
use kurbo::Point;

/// Detect a rectangle spanning the stroke's bounding box.
pub fn detect_rectangle(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    if points.len() < 4 {
        return None;
    }
    let bounds = geometry::bounding_box(points)?;
    if !meets_min_size(bounds, t) {
        log::trace!("Rectangle rejected: {:.1}x{:.1} too small", bounds.width(), bounds.height());
        return None;
    }

    let aspect = bounds.width() / bounds.height();
    if aspect < t.rectangle_min_aspect || aspect > t.rectangle_max_aspect {
        log::trace!("Rectangle rejected: aspect ratio {:.2}", aspect);
        return None;
    }

    // A rectangle traced along its box covers nearly all of it.
    let fill = geometry::fill_ratio(points, bounds)?;
    if fill < t.rectangle_min_fill {
        log::trace!("Rectangle rejected: fills {:.2} of its bounds", fill);
        return None;
    }

    Some(DetectedShape::Rectangle { bounds })
}
