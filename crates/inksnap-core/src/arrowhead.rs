//! Standalone arrowheads and their fusion with an earlier line stroke.
//!
//! A small "V" drawn near the end of an existing line turns that line into an
//! arrow. The V stroke and the line stroke are both consumed.

use crate::config::RecognizerConfig;
use crate::geometry::{self, GEOMETRY_EPSILON};
use crate::shapes::{self, DetectedShape};
use crate::stroke::Stroke;
use kurbo::{Point, Vec2};

/// A V-shaped stroke: where it points and which way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    /// Unit vector the arrowhead points along (away from its open side).
    pub direction: Vec2,
}

/// Result of matching an arrowhead against earlier strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowAttachment {
    /// Arrow from the line's far endpoint to the endpoint under the head.
    pub shape: DetectedShape,
    /// Index of the line stroke the arrow replaces.
    pub remove_index: usize,
}

/// Recognize a small V-shaped stroke.
pub fn detect_arrowhead(points: &[Point], config: &RecognizerConfig) -> Option<Arrowhead> {
    let t = &config.thresholds;
    let n = points.len();
    if n < t.arrowhead_min_points || points.iter().any(|p| !p.is_finite()) {
        return None;
    }
    if geometry::is_closed(points, t.closure_ratio) {
        log::trace!("Arrowhead rejected: stroke is closed");
        return None;
    }
    let diag = geometry::diagonal(geometry::bounding_box(points)?);
    if diag <= t.arrowhead_min_diagonal || diag >= t.arrowhead_max_diagonal {
        log::trace!("Arrowhead rejected: diagonal {:.1} out of range", diag);
        return None;
    }

    let look = (n / 10).max(1);
    let (tip_index, sharpness) = (look..n.saturating_sub(look))
        .filter_map(|i| {
            let incoming = geometry::direction(points[i - look], points[i])?;
            let outgoing = geometry::direction(points[i], points[i + look])?;
            Some((i, geometry::turn_angle(incoming, outgoing)))
        })
        .fold(None, |best: Option<(usize, f64)>, (i, turn)| match best {
            Some((_, sharpest)) if sharpest >= turn => best,
            _ => Some((i, turn)),
        })?;
    if sharpness <= t.arrowhead_tip_degrees.to_radians() {
        log::trace!("Arrowhead rejected: sharpest turn {:.1}°", sharpness.to_degrees());
        return None;
    }

    let tip = points[tip_index];
    let arm_a = geometry::direction(tip, points[0])?;
    let arm_b = geometry::direction(tip, points[n - 1])?;
    let bisector = arm_a + arm_b;
    let len = bisector.hypot();
    if len < GEOMETRY_EPSILON {
        return None;
    }
    Some(Arrowhead {
        tip,
        direction: -bisector / len,
    })
}

/// Endpoints of a stroke that reads as a straight line.
///
/// Two-point strokes are lines that were already idealized and are accepted
/// as they are when long enough.
pub fn line_endpoints(stroke: &Stroke, config: &RecognizerConfig) -> Option<(Point, Point)> {
    let t = &config.thresholds;
    if let [a, b] = stroke.points.as_slice() {
        return (geometry::distance(a.position, b.position) >= t.min_line_length)
            .then_some((a.position, b.position));
    }
    match shapes::detect_line(&stroke.positions(), t)? {
        DetectedShape::Line { start, end } => Some((start, end)),
        _ => None,
    }
}

/// Find the line an arrowhead stroke was drawn onto.
///
/// Of all line endpoints within reach of the tip, the nearest wins; on a tie
/// the most recently drawn stroke is preferred.
pub fn find_attachment(
    new_stroke: &Stroke,
    existing: &[Stroke],
    config: &RecognizerConfig,
) -> Option<ArrowAttachment> {
    let t = &config.thresholds;
    let head = detect_arrowhead(&new_stroke.positions(), config)?;
    log::debug!("Arrowhead at {:?} pointing {:?}", head.tip, head.direction);

    let mut best: Option<(f64, usize, Point, Point)> = None;
    for (index, stroke) in existing.iter().enumerate().rev() {
        let Some((start, end)) = line_endpoints(stroke, config) else {
            continue;
        };
        for (near, far) in [(end, start), (start, end)] {
            let gap = geometry::distance(near, head.tip);
            if gap > t.arrowhead_proximity {
                continue;
            }
            if best.is_none_or(|(nearest, ..)| gap < nearest) {
                best = Some((gap, index, near, far));
            }
        }
    }

    let (_, remove_index, near, far) = best?;
    log::debug!("Arrowhead attaches to stroke {}", remove_index);
    Some(ArrowAttachment {
        shape: DetectedShape::Arrow {
            start: far,
            end: near,
            head_angle: config.build.head_angle_degrees.to_radians(),
        },
        remove_index,
    })
}
