//! InkSnap Core Library
//!
//! Turns finished freehand ink strokes into clean geometric shapes: lines,
//! rectangles, ellipses, triangles, diamonds and arrows. Everything here is a
//! pure function of the input points and the configuration; the host canvas
//! owns storage, rendering and tool selection.

pub mod arrowhead;
pub mod builder;
pub mod config;
pub mod corners;
pub mod geometry;
pub mod recognizer;
pub mod shapes;
pub mod snap;
pub mod stroke;
pub mod tools;

pub use arrowhead::{ArrowAttachment, Arrowhead, detect_arrowhead, find_attachment};
pub use builder::{build_stroke, shape_points};
pub use config::{BuildOptions, ConfigError, ConfigResult, DetectionThresholds, RecognizerConfig};
pub use recognizer::{ArrowFusion, Recognizer, StrokeAction, classify, try_attach_arrowhead};
pub use shapes::{ClosedShapeBand, DetectedShape, ShapeKind, closed_shape_band, detect_shape};
pub use snap::{snap_shape, snap_to_grid};
pub use stroke::{InkColor, InkPoint, Stroke};
pub use tools::ToolKind;
