//! Drawing tools that decide how much recognition a finished stroke gets.

use serde::{Deserialize, Serialize};

/// Available ink tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Freehand ink, never recognized.
    #[default]
    Pen,
    /// Single-stroke shape recognition.
    Shape,
    /// Shape recognition plus arrowhead fusion with earlier strokes.
    Diagram,
}

impl ToolKind {
    /// Whether strokes drawn with this tool go through the shape detectors.
    pub fn recognizes_shapes(self) -> bool {
        matches!(self, ToolKind::Shape | ToolKind::Diagram)
    }

    /// Whether a new stroke may fuse with an earlier one.
    pub fn attaches_arrowheads(self) -> bool {
        self == ToolKind::Diagram
    }
}
