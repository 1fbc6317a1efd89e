//! Shared wire model for the realtime drawing protocol.
//!
//! This crate owns the message shapes used by both `server` and `easel`.
//! Everything on the wire is tagged JSON text: a client sends
//! [`ClientMessage`] values, the hub answers with [`ServerMessage`] values.
//! The payload of interest is [`DrawCommand`] — one atomic drawing
//! instruction (a freehand segment or a finalized shape).

use serde::{Deserialize, Serialize};

/// Error returned by [`DrawCommand::validate`].
///
/// A malformed command is never forwarded by the hub; it is dropped
/// silently at the edge.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The command carries no room id.
    #[error("command is missing a room id")]
    MissingRoomId,
    /// A point coordinate is NaN or infinite.
    #[error("command contains a non-finite coordinate")]
    NonFiniteCoordinate,
    /// The stroke width is zero, negative, or non-finite.
    #[error("invalid stroke width: {0}")]
    InvalidStrokeWidth(f64),
}

/// A point in canvas-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (not NaN, not infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Which primitive a draw command renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Per-segment freehand stroke (default).
    #[default]
    Freehand,
    /// Axis-aligned rectangle outline.
    Rectangle,
    /// Ellipse inscribed in the drag bounding box.
    Ellipse,
    /// Straight line with an arrowhead at the far end.
    Arrow,
}

impl Tool {
    /// Whether this tool is a drag-to-size shape (drawn via preview,
    /// emitted once on pointer-up) rather than a per-segment stroke.
    #[must_use]
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Arrow)
    }
}

/// One atomic drawing instruction exchanged between a client and the hub.
///
/// `prev_point` is `None` only for the first sample of a freehand gesture.
/// Shape commands without a `prev_point` render as no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Opaque room identifier, resolved by an upstream directory.
    pub room_id: String,
    pub tool: Tool,
    pub prev_point: Option<Point>,
    pub current_point: Point,
    /// CSS color string, passed through untouched.
    pub color: String,
    pub stroke_width: f64,
}

impl DrawCommand {
    /// Check the structural invariants the hub requires before appending.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: missing room id, non-finite
    /// coordinate, or non-positive stroke width.
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.room_id.is_empty() {
            return Err(CommandError::MissingRoomId);
        }
        if !self.current_point.is_finite() || self.prev_point.is_some_and(|p| !p.is_finite()) {
            return Err(CommandError::NonFiniteCoordinate);
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(CommandError::InvalidStrokeWidth(self.stroke_width));
        }
        Ok(())
    }
}

/// Messages sent from a client to the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a room, implicitly creating it. The hub answers with a
    /// [`ServerMessage::HistoryReplay`] to the joining connection only.
    Join { room_id: String },
    /// Publish one draw command to the sender's room.
    Draw(DrawCommand),
    /// Truncate the room's log. The sender has already cleared locally.
    ClearRoom { room_id: String },
}

/// Messages sent from the hub to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The full ordered log of a room, sent to a joining connection before
    /// any live fan-out reaches it.
    HistoryReplay { commands: Vec<DrawCommand> },
    /// A live command from a peer. Never echoed to its own sender.
    Draw(DrawCommand),
    /// A peer cleared the room.
    ClearRoom,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
