//! Input model: brush settings and the gesture state machine.
//!
//! `Brush` captures the user's selections at the time of a pointer event;
//! the eraser is a modifier on top of them, not a tool of its own.
//! `Gesture` is the active interaction being tracked between pointer-down
//! and pointer-up, carrying the context needed to chain freehand segments
//! or redraw a shape preview.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use wire::{Point, Tool};

use crate::consts::{BACKGROUND_COLOR, DEFAULT_COLOR, DEFAULT_STROKE_WIDTH, ERASER_WIDTH};
use crate::raster::Snapshot;

/// Per-session brush settings.
///
/// The eraser flag overrides the other selections while set: it forces
/// freehand rendering in the background color at a fixed larger width.
/// Clearing it reverts instantly; nothing about the eraser is latched
/// into the next gesture.
#[derive(Debug, Clone)]
pub struct Brush {
    pub tool: Tool,
    pub color: String,
    pub stroke_width: f64,
    pub eraser: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            tool: Tool::Freehand,
            color: DEFAULT_COLOR.into(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            eraser: false,
        }
    }
}

impl Brush {
    /// The tool applied to the next gesture. The eraser is just a big
    /// freehand stroke.
    #[must_use]
    pub fn effective_tool(&self) -> Tool {
        if self.eraser { Tool::Freehand } else { self.tool }
    }

    /// The stroke color applied to the next gesture.
    #[must_use]
    pub fn effective_color(&self) -> &str {
        if self.eraser { BACKGROUND_COLOR } else { &self.color }
    }

    /// The stroke width applied to the next gesture.
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        if self.eraser { ERASER_WIDTH } else { self.stroke_width }
    }
}

/// The active gesture between pointer-down and pointer-up.
///
/// Exactly one gesture may be in flight per session; a pointer-down while
/// one is active is ignored.
#[derive(Debug, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freehand stroke. Each move emits one segment chaining from
    /// `prev`; `prev` is `None` until the first sample is emitted.
    ActiveFreehand { prev: Option<Point> },
    /// A drag-to-size shape. `start` anchors the preview, `last` is the
    /// most recent pointer position (the finalize point on pointer loss),
    /// and `snapshot` holds the pixels underneath the preview.
    ActiveShape {
        start: Point,
        last: Point,
        snapshot: Option<Snapshot>,
    },
}

impl Gesture {
    /// Whether a gesture is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
