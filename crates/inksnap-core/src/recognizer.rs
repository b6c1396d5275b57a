//! Entry points the host canvas calls when a stroke is finished.

use crate::arrowhead;
use crate::builder;
use crate::config::{ConfigResult, RecognizerConfig};
use crate::shapes::{self, DetectedShape};
use crate::snap;
use crate::stroke::{InkColor, Stroke};
use crate::tools::ToolKind;
use kurbo::Point;

/// An arrow built from an arrowhead stroke and the line it was drawn onto.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFusion {
    /// Arrow stroke that takes the arrowhead stroke's slot.
    pub replacement: Stroke,
    /// Index of the line stroke to delete.
    pub remove_index: usize,
    /// The arrow, after grid snapping.
    pub shape: DetectedShape,
}

/// What the host should do with a finished stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeAction {
    /// Leave the freehand stroke as drawn.
    Keep,
    /// Substitute the stroke with a clean shape.
    Replace(Stroke),
    /// Substitute the stroke and delete an earlier one it absorbed.
    ReplaceAndRemove {
        replacement: Stroke,
        remove_index: usize,
    },
}

impl StrokeAction {
    /// Apply the action to the host's stroke list, where the finished stroke
    /// sits at `new_index`.
    ///
    /// Removal is by index, so identical-looking strokes are never confused.
    /// Returns the index the finished (or replacement) stroke ends up at, or
    /// `None` if `new_index` is out of range.
    pub fn apply(self, strokes: &mut Vec<Stroke>, new_index: usize) -> Option<usize> {
        if new_index >= strokes.len() {
            return None;
        }
        match self {
            StrokeAction::Keep => Some(new_index),
            StrokeAction::Replace(replacement) => {
                strokes[new_index] = replacement;
                Some(new_index)
            }
            StrokeAction::ReplaceAndRemove {
                replacement,
                remove_index,
            } => {
                strokes[new_index] = replacement;
                if remove_index == new_index || remove_index >= strokes.len() {
                    log::warn!("Ignoring removal of stroke {}", remove_index);
                    return Some(new_index);
                }
                strokes.remove(remove_index);
                Some(if remove_index < new_index {
                    new_index - 1
                } else {
                    new_index
                })
            }
        }
    }
}

/// Shape recognizer holding a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    config: RecognizerConfig,
}

impl Recognizer {
    /// Create a recognizer, rejecting unusable thresholds.
    pub fn new(config: RecognizerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Run the detectors on raw points without snapping or building.
    pub fn detect(&self, points: &[Point]) -> Option<DetectedShape> {
        shapes::detect_shape(points, &self.config)
    }

    /// Replace a single stroke with its idealized shape, keeping its color and width.
    ///
    /// A `grid_size` of zero disables snapping.
    pub fn classify(&self, stroke: &Stroke, grid_size: f64) -> Option<Stroke> {
        let shape = self.detect(&stroke.positions())?;
        let shape = snap::snap_shape(&shape, grid_size);
        Some(builder::build_stroke(
            &shape,
            stroke.color,
            stroke.width,
            &self.config.build,
        ))
    }

    /// Fuse a small V-shaped stroke with an earlier line into one arrow.
    pub fn try_attach_arrowhead(
        &self,
        new_stroke: &Stroke,
        existing: &[Stroke],
        color: InkColor,
        width: f64,
        grid_size: f64,
    ) -> Option<ArrowFusion> {
        let attachment = arrowhead::find_attachment(new_stroke, existing, &self.config)?;
        let shape = snap::snap_shape(&attachment.shape, grid_size);
        Some(ArrowFusion {
            replacement: builder::build_stroke(&shape, color, width, &self.config.build),
            remove_index: attachment.remove_index,
            shape,
        })
    }

    /// Decide what happens to a finished stroke drawn with `tool`.
    ///
    /// `existing` holds the strokes drawn before this one; it is only
    /// consulted by the diagram tool.
    pub fn process(
        &self,
        tool: ToolKind,
        stroke: &Stroke,
        existing: &[Stroke],
        grid_size: f64,
    ) -> StrokeAction {
        if !tool.recognizes_shapes() {
            return StrokeAction::Keep;
        }
        if tool.attaches_arrowheads() {
            if let Some(fusion) =
                self.try_attach_arrowhead(stroke, existing, stroke.color, stroke.width, grid_size)
            {
                return StrokeAction::ReplaceAndRemove {
                    replacement: fusion.replacement,
                    remove_index: fusion.remove_index,
                };
            }
        }
        match self.classify(stroke, grid_size) {
            Some(replacement) => StrokeAction::Replace(replacement),
            None => StrokeAction::Keep,
        }
    }
}

/// [`Recognizer::classify`] with the default configuration.
pub fn classify(stroke: &Stroke, grid_size: f64) -> Option<Stroke> {
    Recognizer::default().classify(stroke, grid_size)
}

/// [`Recognizer::try_attach_arrowhead`] with the default configuration.
pub fn try_attach_arrowhead(
    new_stroke: &Stroke,
    existing: &[Stroke],
    color: InkColor,
    width: f64,
    grid_size: f64,
) -> Option<ArrowFusion> {
    Recognizer::default().try_attach_arrowhead(new_stroke, existing, color, width, grid_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn line_stroke() -> Stroke {
        Stroke::from_positions((0..50).map(|i| Point::new(i as f64 * 100.0 / 49.0, 0.0)))
    }

    fn v_stroke() -> Stroke {
        Stroke::from_positions([
            Point::new(78.0, -11.55),
            Point::new(83.0, -8.66),
            Point::new(88.0, -5.77),
            Point::new(93.0, -2.89),
            Point::new(98.0, 0.0),
            Point::new(93.0, 2.89),
            Point::new(88.0, 5.77),
            Point::new(83.0, 8.66),
        ])
    }

    fn square_stroke(size: f64) -> Stroke {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ];
        let mut points = Vec::new();
        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % 4];
            points.extend((0..20).map(|j| a.lerp(b, j as f64 / 20.0)));
        }
        points.push(corners[0]);
        Stroke::from_positions(points)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RecognizerConfig::default();
        config.thresholds.min_shape_size = -1.0;
        assert!(matches!(
            Recognizer::new(config),
            Err(ConfigError::Invalid { field: "min_shape_size", .. })
        ));
    }

    #[test]
    fn test_classify_square() {
        init_logger();
        let mut stroke = square_stroke(100.0);
        stroke.width = 4.0;
        stroke.color = InkColor::new(0, 0, 255, 255);
        let shape = classify(&stroke, 20.0).unwrap();
        assert_eq!(shape.len(), 41);
        assert_eq!(shape.points[0].position, Point::new(0.0, 0.0));
        assert_eq!(shape.points[20].position, Point::new(100.0, 100.0));
        assert_eq!(shape.color, stroke.color);
        assert!((shape.width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let stroke = square_stroke(100.0);
        for grid in [0.0, 20.0, 7.0] {
            assert_eq!(classify(&stroke, grid), classify(&stroke, grid));
        }
    }

    #[test]
    fn test_degenerate_strokes_yield_nothing() {
        let recognizer = Recognizer::default();
        let two = Stroke::from_positions([Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        let zero = Stroke::from_positions(vec![Point::new(5.0, 5.0); 12]);
        let empty = Stroke::from_positions(Vec::new());
        for stroke in [two, zero, empty, square_stroke(30.0)] {
            assert!(recognizer.classify(&stroke, 0.0).is_none());
            assert!(
                recognizer
                    .try_attach_arrowhead(&stroke, &[line_stroke()], InkColor::black(), 2.0, 0.0)
                    .is_none()
            );
        }
    }

    #[test]
    fn test_arrow_fusion() {
        init_logger();
        let fusion = try_attach_arrowhead(
            &v_stroke(),
            &[line_stroke()],
            InkColor::black(),
            2.0,
            0.0,
        )
        .unwrap();
        assert_eq!(fusion.remove_index, 0);
        match fusion.shape {
            DetectedShape::Arrow { start, end, .. } => {
                assert_eq!(start, Point::new(0.0, 0.0));
                assert_eq!(end, Point::new(100.0, 0.0));
            }
            other => panic!("expected arrow, got {other:?}"),
        }
        assert_eq!(fusion.replacement.points[0].position, Point::new(0.0, 0.0));
        assert_eq!(fusion.replacement.len(), 11 + 3 * 5);
    }

    #[test]
    fn test_pen_keeps_everything() {
        let recognizer = Recognizer::default();
        let action = recognizer.process(ToolKind::Pen, &square_stroke(100.0), &[], 0.0);
        assert_eq!(action, StrokeAction::Keep);
    }

    #[test]
    fn test_shape_tool_ignores_arrowheads() {
        let recognizer = Recognizer::default();
        let action = recognizer.process(ToolKind::Shape, &v_stroke(), &[line_stroke()], 0.0);
        assert_eq!(action, StrokeAction::Keep);
    }

    #[test]
    fn test_diagram_tool_fuses_and_applies() {
        let recognizer = Recognizer::default();
        let other = square_stroke(100.0);
        let mut strokes = vec![other.clone(), line_stroke(), v_stroke()];
        let action = recognizer.process(ToolKind::Diagram, &strokes[2], &strokes[..2], 0.0);
        let StrokeAction::ReplaceAndRemove { remove_index, .. } = &action else {
            panic!("expected fusion, got {action:?}");
        };
        assert_eq!(*remove_index, 1);

        assert_eq!(action.apply(&mut strokes, 2), Some(1));
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0], other);
        assert_eq!(strokes[1].points[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_diagram_tool_falls_back_to_shapes() {
        let recognizer = Recognizer::default();
        let action = recognizer.process(ToolKind::Diagram, &square_stroke(100.0), &[], 0.0);
        assert!(matches!(action, StrokeAction::Replace(_)));
    }

    #[test]
    fn test_apply_out_of_range() {
        let mut strokes = vec![line_stroke()];
        assert_eq!(StrokeAction::Keep.apply(&mut strokes, 3), None);
        assert_eq!(strokes.len(), 1);
    }
}
