//! Corner finding along a stroke.
//!
//! Step size and look-ahead scale with the number of points so the result
//! does not depend on input device resolution.

use crate::config::DetectionThresholds;
use crate::geometry::{self, GEOMETRY_EPSILON};
use kurbo::Point;

/// Corners the triangle finder may return.
pub const TRIANGLE_CORNERS: usize = 3;

/// A sharp direction change along a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Index into the searched point sequence.
    pub index: usize,
    /// Location of the corner.
    pub point: Point,
    /// Direction change at the corner, in radians.
    pub sharpness: f64,
}

/// Sampling parameters for one corner search.
#[derive(Debug, Clone, Copy)]
struct CornerSearch {
    step: usize,
    look_ahead: usize,
    separation_ratio: f64,
    max_corners: usize,
}

/// Find up to `max_corners` sharp points, sharpest first.
pub fn find_corners(points: &[Point], thresholds: &DetectionThresholds) -> Vec<Corner> {
    let n = points.len();
    let search = CornerSearch {
        step: (n / 50).max(2),
        look_ahead: (n / 20).max(3),
        separation_ratio: thresholds.corner_separation_ratio,
        max_corners: thresholds.max_corners,
    };
    search.run(points, thresholds)
}

/// Coarser search used for triangles: wider windows, at most three corners.
pub fn find_triangle_corners(points: &[Point], thresholds: &DetectionThresholds) -> Vec<Corner> {
    let n = points.len();
    let search = CornerSearch {
        step: (n / 40).max(2),
        look_ahead: (n / 10).max(4),
        separation_ratio: thresholds.triangle_corner_separation_ratio,
        max_corners: TRIANGLE_CORNERS,
    };
    search.run(points, thresholds)
}

impl CornerSearch {
    fn run(&self, points: &[Point], thresholds: &DetectionThresholds) -> Vec<Corner> {
        let closed = geometry::is_closed(points, thresholds.closure_ratio);
        let mut points = points;
        // The closing point duplicating the first would read as a zero-length segment.
        while closed
            && points.len() > 1
            && geometry::distance(points[0], points[points.len() - 1]) < GEOMETRY_EPSILON
        {
            points = &points[..points.len() - 1];
        }

        let n = points.len();
        if n < 3 {
            return Vec::new();
        }
        let Some(bounds) = geometry::bounding_box(points) else {
            return Vec::new();
        };
        let look = self.look_ahead.min(n / 3).max(1);
        let threshold = thresholds.corner_angle_degrees.to_radians();

        let indices: Vec<usize> = if closed {
            (0..n).step_by(self.step).collect()
        } else if n > 2 * look {
            (look..n - look).step_by(self.step).collect()
        } else {
            Vec::new()
        };

        let mut candidates: Vec<Corner> = indices
            .into_iter()
            .filter_map(|i| {
                let prev = points[(i + n - look) % n];
                let curr = points[i];
                let next = points[(i + look) % n];
                let incoming = geometry::direction(prev, curr)?;
                let outgoing = geometry::direction(curr, next)?;
                let sharpness = geometry::turn_angle(incoming, outgoing);
                (sharpness > threshold).then_some(Corner {
                    index: i,
                    point: curr,
                    sharpness,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.sharpness
                .total_cmp(&a.sharpness)
                .then(a.index.cmp(&b.index))
        });

        let min_separation = self.separation_ratio * bounds.width().min(bounds.height());
        let mut accepted: Vec<Corner> = Vec::with_capacity(self.max_corners);
        for candidate in candidates {
            if accepted.len() >= self.max_corners {
                break;
            }
            let isolated = accepted
                .iter()
                .all(|c| geometry::distance(c.point, candidate.point) >= min_separation);
            if isolated {
                accepted.push(candidate);
            }
        }
        accepted
    }
}
