//! Single-stroke arrow detection.

use super::DetectedShape;
use crate::config::DetectionThresholds;
use crate::geometry;
use kurbo::{Point, Vec2};

/// Which end of the stroke a head is searched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadEnd {
    Leading,
    Trailing,
}

/// Detect an arrow drawn in one stroke: a straight shaft with a two-barbed
/// head at either end.
///
/// A head at the end of the stroke gives a forward arrow. A head at the start
/// gives an arrow whose tip is at the start, so the reported shaft runs from
/// the stroke's last point to that tip.
pub fn detect_arrow(
    points: &[Point],
    t: &DetectionThresholds,
    head_angle: f64,
) -> Option<DetectedShape> {
    let n = points.len();
    if n < t.arrow_min_points {
        return None;
    }
    let first = points[0];
    let last = points[n - 1];
    let span = geometry::distance(first, last);
    if span < t.min_line_length {
        return None;
    }

    let head_len = ((n as f64 * t.arrow_head_fraction) as usize).max(1);
    let (a, b) = (head_len, n - 1 - head_len);
    if a >= b {
        return None;
    }

    // The head bends the ends of the stroke, so only the middle is held to
    // the (looser) straightness test.
    let ratio = geometry::max_deviation_ratio(&points[a..=b], points[a], points[b])?;
    if ratio >= t.arrow_shaft_deviation_ratio {
        log::trace!("Arrow rejected: shaft deviation ratio {:.3}", ratio);
        return None;
    }
    let shaft = geometry::direction(points[a], points[b])?;
    let min_barb = t.arrow_barb_min_length_ratio * span;

    let (start, tip) = match find_head(&points[b..], shaft, HeadEnd::Trailing, t, min_barb) {
        Some(tip) => (first, tip),
        None => (last, find_head(&points[..=a], shaft, HeadEnd::Leading, t, min_barb)?),
    };

    if geometry::distance(start, tip) < t.min_line_length {
        return None;
    }
    Some(DetectedShape::Arrow {
        start,
        end: tip,
        head_angle,
    })
}

/// Look for barbs on both sides of the shaft near one end of the stroke.
///
/// Returns the tip: the point furthest along the shaft in the head's direction.
fn find_head(
    segment: &[Point],
    shaft: Vec2,
    end: HeadEnd,
    t: &DetectionThresholds,
    min_barb: f64,
) -> Option<Point> {
    let along = |p: &Point| p.to_vec2().dot(shaft);
    let tip = match end {
        HeadEnd::Trailing => segment.iter().max_by(|a, b| along(a).total_cmp(&along(b))),
        HeadEnd::Leading => segment.iter().min_by(|a, b| along(a).total_cmp(&along(b))),
    }
    .copied()?;
    // Barbs trail back from the tip toward the shaft.
    let back = match end {
        HeadEnd::Trailing => -shaft,
        HeadEnd::Leading => shaft,
    };

    let lo = t.arrow_barb_min_degrees.to_radians();
    let hi = t.arrow_barb_max_degrees.to_radians();
    let (mut left, mut right) = (0usize, 0usize);
    for p in segment {
        let v = *p - tip;
        if v.hypot() < min_barb.max(geometry::GEOMETRY_EPSILON) {
            continue;
        }
        let angle = geometry::angle_between(back, v);
        if angle < lo || angle > hi {
            continue;
        }
        if back.cross(v) > 0.0 {
            left += 1;
        } else {
            right += 1;
        }
    }

    // One-sided divergence is just wobble.
    if left >= t.arrow_min_barb_points && right >= t.arrow_min_barb_points {
        Some(tip)
    } else {
        log::trace!("No {:?} head: {} left / {} right barb points", end, left, right);
        None
    }
}
