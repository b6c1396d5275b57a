//! Detected shapes and the dispatcher that picks a detector for a stroke.

mod arrow;
mod circle;
mod diamond;
mod line;
mod rectangle;
mod triangle;

pub use arrow::detect_arrow;
pub use circle::detect_circle;
pub use diamond::detect_diamond;
pub use line::detect_line;
pub use rectangle::detect_rectangle;
pub use triangle::detect_triangle;

use crate::config::{DetectionThresholds, RecognizerConfig};
use crate::corners;
use crate::geometry::{self, GEOMETRY_EPSILON};
use kurbo::{Point, Rect};
use std::fmt;

/// An idealized shape recognized from a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectedShape {
    Line {
        start: Point,
        end: Point,
    },
    Rectangle {
        bounds: Rect,
    },
    /// Circle or axis-aligned ellipse.
    Circle {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Triangle {
        vertices: [Point; 3],
    },
    /// Arrow from `start` to the tip at `end`; `head_angle` is the angle
    /// between each barb and the shaft, in radians.
    Arrow {
        start: Point,
        end: Point,
        head_angle: f64,
    },
    Diamond {
        center: Point,
        width: f64,
        height: f64,
    },
}

/// Shape family without geometry, for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Arrow,
    Diamond,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Diamond => "diamond",
        };
        f.write_str(name)
    }
}

impl DetectedShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            DetectedShape::Line { .. } => ShapeKind::Line,
            DetectedShape::Rectangle { .. } => ShapeKind::Rectangle,
            DetectedShape::Circle { .. } => ShapeKind::Circle,
            DetectedShape::Triangle { .. } => ShapeKind::Triangle,
            DetectedShape::Arrow { .. } => ShapeKind::Arrow,
            DetectedShape::Diamond { .. } => ShapeKind::Diamond,
        }
    }

    /// Bounding box of the shape's defining geometry (arrowheads excluded).
    pub fn bounds(&self) -> Rect {
        match *self {
            DetectedShape::Line { start, end } | DetectedShape::Arrow { start, end, .. } => {
                Rect::from_points(start, end)
            }
            DetectedShape::Rectangle { bounds } => bounds,
            DetectedShape::Circle {
                center,
                radius_x,
                radius_y,
            } => Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                center.x + radius_x,
                center.y + radius_y,
            ),
            DetectedShape::Triangle { vertices } => {
                geometry::bounding_box(&vertices).unwrap_or(Rect::ZERO)
            }
            DetectedShape::Diamond {
                center,
                width,
                height,
            } => Rect::from_center_size(center, (width, height)),
        }
    }

    /// Corners of polygonal shapes in drawing order.
    ///
    /// Rectangles run top-left, top-right, bottom-right, bottom-left; diamonds
    /// run top, right, bottom, left.
    pub fn corners(&self) -> Option<Vec<Point>> {
        match *self {
            DetectedShape::Rectangle { bounds } => Some(vec![
                Point::new(bounds.x0, bounds.y0),
                Point::new(bounds.x1, bounds.y0),
                Point::new(bounds.x1, bounds.y1),
                Point::new(bounds.x0, bounds.y1),
            ]),
            DetectedShape::Triangle { vertices } => Some(vertices.to_vec()),
            DetectedShape::Diamond {
                center,
                width,
                height,
            } => Some(vec![
                Point::new(center.x, center.y - height / 2.0),
                Point::new(center.x + width / 2.0, center.y),
                Point::new(center.x, center.y + height / 2.0),
                Point::new(center.x - width / 2.0, center.y),
            ]),
            _ => None,
        }
    }

    /// Whether the shape has collapsed to zero length or area.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            DetectedShape::Line { start, end } | DetectedShape::Arrow { start, end, .. } => {
                geometry::distance(start, end) < GEOMETRY_EPSILON
            }
            DetectedShape::Rectangle { bounds } => {
                bounds.width() < GEOMETRY_EPSILON || bounds.height() < GEOMETRY_EPSILON
            }
            DetectedShape::Circle {
                radius_x, radius_y, ..
            } => radius_x < GEOMETRY_EPSILON || radius_y < GEOMETRY_EPSILON,
            DetectedShape::Triangle { vertices } => {
                geometry::polygon_area(&vertices) < GEOMETRY_EPSILON
            }
            DetectedShape::Diamond { width, height, .. } => {
                width < GEOMETRY_EPSILON || height < GEOMETRY_EPSILON
            }
        }
    }
}

/// Circularity band of a closed stroke, which decides the detectors tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedShapeBand {
    /// Close to a circle: circle, then diamond, then rectangle.
    Round,
    /// Square-ish: diamond, then rectangle, then triangle.
    Boxy,
    /// Elongated or pointed: rectangle when four corners are found, else triangle.
    Angular,
}

/// Map a circularity value onto its band.
pub fn closed_shape_band(circularity: f64, thresholds: &DetectionThresholds) -> ClosedShapeBand {
    if circularity < thresholds.circle_max_circularity {
        ClosedShapeBand::Round
    } else if circularity < thresholds.diamond_max_circularity {
        ClosedShapeBand::Boxy
    } else {
        ClosedShapeBand::Angular
    }
}

/// Run the detectors on one finished stroke.
///
/// Arrows are tried before lines since an arrow is a line with a head.
/// Open strokes can only be lines; closed strokes are routed by circularity.
pub fn detect_shape(points: &[Point], config: &RecognizerConfig) -> Option<DetectedShape> {
    let t = &config.thresholds;
    if points.len() < 3 {
        log::trace!("Stroke too short to classify ({} points)", points.len());
        return None;
    }
    if points.iter().any(|p| !p.is_finite()) {
        log::trace!("Stroke has non-finite coordinates");
        return None;
    }

    let head_angle = config.build.head_angle_degrees.to_radians();
    if let Some(arrow) = detect_arrow(points, t, head_angle) {
        log::debug!("Detected arrow: {:?}", arrow);
        return Some(arrow);
    }

    if !geometry::is_closed(points, t.closure_ratio) {
        let line = detect_line(points, t);
        match &line {
            Some(shape) => log::debug!("Detected line: {:?}", shape),
            None => log::trace!("Open stroke is not a line"),
        }
        return line;
    }

    let Some(circularity) = geometry::circularity(points) else {
        log::trace!("Closed stroke encloses no area");
        return None;
    };
    let band = closed_shape_band(circularity, t);
    log::debug!("Closed stroke: circularity {:.3} ({:?})", circularity, band);

    let shape = match band {
        ClosedShapeBand::Round => detect_circle(points, t)
            .or_else(|| detect_diamond(points, t))
            .or_else(|| boxed_by_corners(points, t)),
        ClosedShapeBand::Boxy => detect_diamond(points, t)
            .or_else(|| detect_rectangle(points, t))
            .or_else(|| detect_triangle(points, t)),
        ClosedShapeBand::Angular => {
            boxed_by_corners(points, t).or_else(|| detect_triangle(points, t))
        }
    };

    match &shape {
        Some(shape) => log::debug!("Detected {}: {:?}", shape.kind(), shape),
        None => log::debug!("No shape matched closed stroke"),
    }
    shape
}

/// Rectangle, but only for strokes that show four distinct corners.
fn boxed_by_corners(points: &[Point], t: &DetectionThresholds) -> Option<DetectedShape> {
    let corners = corners::find_corners(points, t);
    if corners.len() < 4 {
        log::trace!("Only {} corners, not a rectangle", corners.len());
        return None;
    }
    detect_rectangle(points, t)
}

/// Shared size precondition for closed shapes.
pub(crate) fn meets_min_size(bounds: Rect, t: &DetectionThresholds) -> bool {
    let (w, h) = (bounds.width(), bounds.height());
    w > GEOMETRY_EPSILON && h > GEOMETRY_EPSILON && w.max(h) >= t.min_shape_size
}

#[cfg(test)]
pub(crate) mod test_support {
    use kurbo::Point;

    /// Closed polygon with `per_edge` evenly spaced points on each edge.
    pub fn polygon(corners: &[Point], per_edge: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            for j in 0..per_edge {
                points.push(a.lerp(b, j as f64 / per_edge as f64));
            }
        }
        points.push(corners[0]);
        points
    }

    /// Points on an ellipse, closed.
    pub fn ellipse(center: Point, rx: f64, ry: f64, samples: usize) -> Vec<Point> {
        (0..=samples)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / samples as f64;
                Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
            })
            .collect()
    }

    /// Evenly spaced points from `a` to `b`, both included.
    pub fn segment(a: Point, b: Point, count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| a.lerp(b, i as f64 / (count - 1) as f64))
            .collect()
    }

    pub fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        polygon(
            &[
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size, y + size),
                Point::new(x, y + size),
            ],
            20,
        )
    }

    pub fn rotated_square() -> Vec<Point> {
        polygon(
            &[
                Point::new(50.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
                Point::new(0.0, 50.0),
            ],
            20,
        )
    }
}
