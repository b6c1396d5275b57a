//! Ink stroke data handed over by the host canvas.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable ink color (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for InkColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<InkColor> for Color {
    fn from(color: InkColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A single sampled point of a stroke.
///
/// Only `position` takes part in recognition. The authoring metadata is
/// carried through for the host and synthesized for built strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    /// Location in canvas coordinates.
    pub position: Point,
    /// Seconds since the stroke began.
    #[serde(default)]
    pub time_offset: f64,
    /// Normalized pen pressure (1.0 = nominal).
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    /// Pressure-derived nib width at this point.
    #[serde(default)]
    pub width: f64,
    /// Pen tilt in radians (0 = perpendicular to the surface).
    #[serde(default)]
    pub tilt: f64,
}

fn default_pressure() -> f64 {
    1.0
}

impl InkPoint {
    /// A point with nominal pressure and no timing information.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            time_offset: 0.0,
            pressure: 1.0,
            width: 0.0,
            tilt: 0.0,
        }
    }
}

impl From<Point> for InkPoint {
    fn from(position: Point) -> Self {
        Self::new(position)
    }
}

/// An ordered run of ink points plus its rendering attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in drawing order.
    pub points: Vec<InkPoint>,
    /// Rendering width.
    pub width: f64,
    /// Ink color.
    pub color: InkColor,
}

impl Stroke {
    /// Create a stroke from existing points.
    pub fn new(points: Vec<InkPoint>, width: f64, color: InkColor) -> Self {
        Self {
            points,
            width,
            color,
        }
    }

    /// Create a stroke from bare positions with default width and color.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        Self {
            points: positions.into_iter().map(InkPoint::new).collect(),
            width: 2.0,
            color: InkColor::default(),
        }
    }

    /// Positions only, in drawing order.
    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds of the stroke's positions.
    pub fn bounds(&self) -> Rect {
        crate::geometry::bounding_box(&self.positions()).unwrap_or(Rect::ZERO)
    }
}
