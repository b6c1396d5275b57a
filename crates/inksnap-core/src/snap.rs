//! Grid snapping for detected shapes.

use crate::shapes::DetectedShape;
use kurbo::{Point, Rect};

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Snap a radius to the nearest half grid step, never below half a step.
pub fn snap_radius(radius: f64, grid_size: f64) -> f64 {
    let half = grid_size / 2.0;
    ((radius / half).round() * half).max(half)
}

/// Snap both corners of a box independently; the result is normalized.
pub fn snap_rect(rect: Rect, grid_size: f64) -> Rect {
    Rect::from_points(
        snap_to_grid(Point::new(rect.x0, rect.y0), grid_size),
        snap_to_grid(Point::new(rect.x1, rect.y1), grid_size),
    )
}

/// Snap a shape's defining coordinates to the grid.
///
/// A non-positive (or non-finite) `grid_size` disables snapping. If snapping
/// would collapse the shape, it is returned unchanged.
pub fn snap_shape(shape: &DetectedShape, grid_size: f64) -> DetectedShape {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return *shape;
    }

    let snap = |p: Point| snap_to_grid(p, grid_size);
    let snapped = match *shape {
        DetectedShape::Line { start, end } => DetectedShape::Line {
            start: snap(start),
            end: snap(end),
        },
        DetectedShape::Rectangle { bounds } => DetectedShape::Rectangle {
            bounds: snap_rect(bounds, grid_size),
        },
        DetectedShape::Circle {
            center,
            radius_x,
            radius_y,
        } => DetectedShape::Circle {
            center: snap(center),
            radius_x: snap_radius(radius_x, grid_size),
            radius_y: snap_radius(radius_y, grid_size),
        },
        DetectedShape::Triangle { vertices } => DetectedShape::Triangle {
            vertices: vertices.map(snap),
        },
        DetectedShape::Arrow {
            start,
            end,
            head_angle,
        } => DetectedShape::Arrow {
            start: snap(start),
            end: snap(end),
            head_angle,
        },
        DetectedShape::Diamond { .. } => {
            let bounds = snap_rect(shape.bounds(), grid_size);
            DetectedShape::Diamond {
                center: bounds.center(),
                width: bounds.width(),
                height: bounds.height(),
            }
        }
    };

    if snapped.is_degenerate() {
        log::debug!("Grid {} collapses {}; leaving it unsnapped", grid_size, shape.kind());
        *shape
    } else {
        snapped
    }
}
