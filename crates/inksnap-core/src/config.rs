//! Recognition thresholds and stroke-building options.
//!
//! The defaults are empirically tuned values. They are exposed as plain
//! configuration so hosts and tests can retune them, and can be loaded from
//! JSON (missing fields keep their defaults).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Thresholds used by the shape detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    // -- Lines --
    /// Minimum start-to-end distance for a line or arrow.
    pub min_line_length: f64,
    /// Maximum deviation ratio for a stroke to count as straight.
    pub line_deviation_ratio: f64,
    /// Lines within this many degrees of horizontal/vertical snap to the axis.
    pub axis_snap_degrees: f64,

    // -- Closed shapes --
    /// Start-to-end distance, as a fraction of the bounding diagonal, below
    /// which a stroke is closed.
    pub closure_ratio: f64,
    /// Minimum bounding-box extent of a closed shape.
    pub min_shape_size: f64,
    /// Circularity below which the circle detector is tried first.
    pub circle_max_circularity: f64,
    /// Circularity below which diamond/rectangle are tried before corner counting.
    pub diamond_max_circularity: f64,
    /// Maximum mean radial deviation from the bounding ellipse for a circle.
    pub circle_roundness_tolerance: f64,
    /// Allowed rectangle width/height range.
    pub rectangle_min_aspect: f64,
    pub rectangle_max_aspect: f64,
    /// Minimum fraction of the bounding box a rectangle stroke must enclose.
    pub rectangle_min_fill: f64,
    /// Distance, as a fraction of the half-extent, an extreme point may sit
    /// from the box's center line and still count toward a diamond.
    pub diamond_center_tolerance: f64,
    /// How many of the four extremes must be centered.
    pub diamond_min_centered_extremes: usize,
    /// Maximum fraction of the bounding box a diamond stroke may enclose.
    pub diamond_max_fill: f64,
    /// Shortest triangle side, relative to the longest.
    pub triangle_min_side_ratio: f64,

    // -- Corners --
    /// Direction change (degrees) above which a point is a corner candidate.
    pub corner_angle_degrees: f64,
    /// Minimum corner spacing as a fraction of the bounding box's smaller side.
    pub corner_separation_ratio: f64,
    /// Corner spacing used by the triangle finder.
    pub triangle_corner_separation_ratio: f64,
    /// Cap on corners returned by the general finder.
    pub max_corners: usize,

    // -- Single-stroke arrows --
    pub arrow_min_points: usize,
    /// Deviation ratio allowed for the middle half of an arrow stroke.
    pub arrow_shaft_deviation_ratio: f64,
    /// Fraction of the points at either end searched for a head.
    pub arrow_head_fraction: f64,
    /// Angular band (degrees from the shaft) a barb point must fall in.
    pub arrow_barb_min_degrees: f64,
    pub arrow_barb_max_degrees: f64,
    /// Barb points required on each side of the shaft.
    pub arrow_min_barb_points: usize,
    /// Points closer to the tip than this fraction of the stroke length are ignored.
    pub arrow_barb_min_length_ratio: f64,

    // -- Standalone arrowheads --
    pub arrowhead_min_points: usize,
    /// Exclusive bounding-diagonal window for an arrowhead stroke.
    pub arrowhead_min_diagonal: f64,
    pub arrowhead_max_diagonal: f64,
    /// Minimum turn (degrees) at the arrowhead tip.
    pub arrowhead_tip_degrees: f64,
    /// Maximum distance from the tip to a line endpoint.
    pub arrowhead_proximity: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            min_line_length: 30.0,
            line_deviation_ratio: 0.12,
            axis_snap_degrees: 8.0,
            closure_ratio: 0.2,
            min_shape_size: 50.0,
            circle_max_circularity: 1.40,
            diamond_max_circularity: 1.70,
            circle_roundness_tolerance: 0.10,
            rectangle_min_aspect: 0.2,
            rectangle_max_aspect: 5.0,
            rectangle_min_fill: 0.75,
            diamond_center_tolerance: 0.25,
            diamond_min_centered_extremes: 3,
            diamond_max_fill: 0.7,
            triangle_min_side_ratio: 0.15,
            corner_angle_degrees: 30.0,
            corner_separation_ratio: 0.15,
            triangle_corner_separation_ratio: 0.2,
            max_corners: 6,
            arrow_min_points: 10,
            arrow_shaft_deviation_ratio: 0.25,
            arrow_head_fraction: 0.25,
            arrow_barb_min_degrees: 25.0,
            arrow_barb_max_degrees: 51.0,
            arrow_min_barb_points: 2,
            arrow_barb_min_length_ratio: 0.05,
            arrowhead_min_points: 5,
            arrowhead_min_diagonal: 15.0,
            arrowhead_max_diagonal: 80.0,
            arrowhead_tip_degrees: 60.0,
            arrowhead_proximity: 40.0,
        }
    }
}

/// Options for turning a detected shape back into ink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Interpolated points per polygon edge.
    pub edge_points: usize,
    /// Samples around an ellipse.
    pub ellipse_samples: usize,
    /// Angle between each barb and the shaft, in degrees.
    pub head_angle_degrees: f64,
    /// Barb length.
    pub head_length: f64,
    /// How far short of the tip the shaft stops, as a fraction of the head length.
    pub shaft_pullback: f64,
    /// Interpolated points per arrowhead leg.
    pub head_leg_points: usize,
    /// Synthetic time between consecutive points, in seconds.
    pub time_step: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            edge_points: 10,
            ellipse_samples: 48,
            head_angle_degrees: 30.0,
            head_length: 20.0,
            shaft_pullback: 0.3,
            head_leg_points: 5,
            time_step: 0.01,
        }
    }
}

/// Complete recognizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub thresholds: DetectionThresholds,
    pub build: BuildOptions,
}

impl RecognizerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let t = &self.thresholds;
        positive("min_line_length", t.min_line_length)?;
        positive("line_deviation_ratio", t.line_deviation_ratio)?;
        non_negative("axis_snap_degrees", t.axis_snap_degrees)?;
        positive("closure_ratio", t.closure_ratio)?;
        positive("min_shape_size", t.min_shape_size)?;
        positive("circle_max_circularity", t.circle_max_circularity)?;
        ordered(
            "diamond_max_circularity",
            t.circle_max_circularity,
            t.diamond_max_circularity,
        )?;
        positive("circle_roundness_tolerance", t.circle_roundness_tolerance)?;
        positive("rectangle_min_aspect", t.rectangle_min_aspect)?;
        ordered("rectangle_max_aspect", t.rectangle_min_aspect, t.rectangle_max_aspect)?;
        fraction("rectangle_min_fill", t.rectangle_min_fill)?;
        positive("diamond_center_tolerance", t.diamond_center_tolerance)?;
        count_in("diamond_min_centered_extremes", t.diamond_min_centered_extremes, 1, 4)?;
        fraction("diamond_max_fill", t.diamond_max_fill)?;
        fraction("triangle_min_side_ratio", t.triangle_min_side_ratio)?;
        positive("corner_angle_degrees", t.corner_angle_degrees)?;
        fraction("corner_separation_ratio", t.corner_separation_ratio)?;
        fraction("triangle_corner_separation_ratio", t.triangle_corner_separation_ratio)?;
        count_in("max_corners", t.max_corners, 4, usize::MAX)?;
        count_in("arrow_min_points", t.arrow_min_points, 4, usize::MAX)?;
        positive("arrow_shaft_deviation_ratio", t.arrow_shaft_deviation_ratio)?;
        below_half("arrow_head_fraction", t.arrow_head_fraction)?;
        non_negative("arrow_barb_min_degrees", t.arrow_barb_min_degrees)?;
        ordered(
            "arrow_barb_max_degrees",
            t.arrow_barb_min_degrees,
            t.arrow_barb_max_degrees,
        )?;
        count_in("arrow_min_barb_points", t.arrow_min_barb_points, 1, usize::MAX)?;
        non_negative("arrow_barb_min_length_ratio", t.arrow_barb_min_length_ratio)?;
        count_in("arrowhead_min_points", t.arrowhead_min_points, 3, usize::MAX)?;
        non_negative("arrowhead_min_diagonal", t.arrowhead_min_diagonal)?;
        ordered(
            "arrowhead_max_diagonal",
            t.arrowhead_min_diagonal,
            t.arrowhead_max_diagonal,
        )?;
        positive("arrowhead_tip_degrees", t.arrowhead_tip_degrees)?;
        positive("arrowhead_proximity", t.arrowhead_proximity)?;

        let b = &self.build;
        count_in("edge_points", b.edge_points, 1, usize::MAX)?;
        count_in("ellipse_samples", b.ellipse_samples, 8, usize::MAX)?;
        positive("head_angle_degrees", b.head_angle_degrees)?;
        positive("head_length", b.head_length)?;
        fraction("shaft_pullback", b.shaft_pullback)?;
        count_in("head_leg_points", b.head_leg_points, 1, usize::MAX)?;
        non_negative("time_step", b.time_step)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("expected a finite value >= 0, got {value}")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, format!("expected a finite value > 0, got {value}")));
    }
    Ok(())
}

fn fraction(field: &'static str, value: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, format!("expected a value in [0, 1], got {value}")));
    }
    Ok(())
}

fn below_half(field: &'static str, value: f64) -> ConfigResult<()> {
    if !(value > 0.0 && value < 0.5) {
        return Err(invalid(field, format!("expected a value in (0, 0.5), got {value}")));
    }
    Ok(())
}

fn ordered(field: &'static str, lower: f64, upper: f64) -> ConfigResult<()> {
    if !upper.is_finite() || upper <= lower {
        return Err(invalid(field, format!("must exceed {lower}, got {upper}")));
    }
    Ok(())
}

fn count_in(field: &'static str, value: usize, min: usize, max: usize) -> ConfigResult<()> {
    if value < min || value > max {
        let expected = if max == usize::MAX {
            format!("at least {min}")
        } else {
            format!("between {min} and {max}")
        };
        return Err(invalid(field, format!("expected {expected}, got {value}")));
    }
    Ok(())
}
