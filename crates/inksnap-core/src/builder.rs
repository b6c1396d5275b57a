//! Converts a detected shape back into ink.
//!
//! Built strokes carry uniform pressure and width. Pressure recorded on the
//! freehand stroke is not carried over.

use crate::config::BuildOptions;
use crate::geometry;
use crate::shapes::DetectedShape;
use crate::stroke::{InkColor, InkPoint, Stroke};
use kurbo::Point;
use std::f64::consts::TAU;

/// Build a renderable stroke for `shape` with the requested color and width.
pub fn build_stroke(
    shape: &DetectedShape,
    color: InkColor,
    width: f64,
    options: &BuildOptions,
) -> Stroke {
    let points = shape_points(shape, options)
        .into_iter()
        .enumerate()
        .map(|(i, position)| InkPoint {
            position,
            time_offset: i as f64 * options.time_step,
            pressure: 1.0,
            width,
            tilt: 0.0,
        })
        .collect();
    Stroke::new(points, width, color)
}

/// Dense outline of a shape, in drawing order.
///
/// Closed outlines repeat their first point at the end; renderers must not
/// close the path on their own.
pub fn shape_points(shape: &DetectedShape, options: &BuildOptions) -> Vec<Point> {
    match *shape {
        DetectedShape::Line { start, end } => vec![start, end],
        DetectedShape::Circle {
            center,
            radius_x,
            radius_y,
        } => ellipse_points(center, radius_x, radius_y, options.ellipse_samples),
        DetectedShape::Arrow {
            start,
            end,
            head_angle,
        } => arrow_points(start, end, head_angle, options),
        DetectedShape::Rectangle { .. }
        | DetectedShape::Triangle { .. }
        | DetectedShape::Diamond { .. } => {
            let corners = shape.corners().unwrap_or_default();
            polygon_points(&corners, options.edge_points)
        }
    }
}

/// `edge_points` evenly spaced points along each edge, then the first corner again.
fn polygon_points(corners: &[Point], edge_points: usize) -> Vec<Point> {
    let Some(&first) = corners.first() else {
        return Vec::new();
    };
    let per_edge = edge_points.max(1);
    let mut points = Vec::with_capacity(corners.len() * per_edge + 1);
    for (i, &a) in corners.iter().enumerate() {
        let b = corners[(i + 1) % corners.len()];
        points.extend((0..per_edge).map(|j| a.lerp(b, j as f64 / per_edge as f64)));
    }
    points.push(first);
    points
}

/// `samples` points around the ellipse, the last coinciding with the first.
fn ellipse_points(center: Point, radius_x: f64, radius_y: f64, samples: usize) -> Vec<Point> {
    let samples = samples.max(2);
    (0..samples)
        .map(|i| {
            let theta = TAU * i as f64 / (samples - 1) as f64;
            Point::new(
                center.x + radius_x * theta.cos(),
                center.y + radius_y * theta.sin(),
            )
        })
        .collect()
}

/// Shaft plus a V-shaped head drawn without lifting the pen.
///
/// The shaft stops short of the tip so the head covers its end, then the
/// path runs to one barb, back to the tip, and out to the other barb.
fn arrow_points(start: Point, tip: Point, head_angle: f64, options: &BuildOptions) -> Vec<Point> {
    let Some(dir) = geometry::direction(start, tip) else {
        return vec![start, tip];
    };
    let head_length = options.head_length;
    let shaft_end = tip - dir * (options.shaft_pullback * head_length);
    let left = tip + geometry::rotate(-dir, head_angle) * head_length;
    let right = tip + geometry::rotate(-dir, -head_angle) * head_length;

    let shaft_steps = options.edge_points.max(1);
    let leg_steps = options.head_leg_points.max(1);
    let mut points = Vec::with_capacity(shaft_steps + 1 + 3 * leg_steps);
    points.extend(
        (0..=shaft_steps).map(|j| start.lerp(shaft_end, j as f64 / shaft_steps as f64)),
    );
    for (a, b) in [(shaft_end, left), (left, tip), (tip, right)] {
        points.extend((1..=leg_steps).map(|j| a.lerp(b, j as f64 / leg_steps as f64)));
    }
    points
}
