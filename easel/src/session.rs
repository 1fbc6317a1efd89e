//! Draw session state machine.
//!
//! DESIGN: the session owns everything a single connection-to-a-room
//! needs on the client side: the brush, the camera, and the in-flight
//! gesture. Pointer events come in as world-space points (the embedding
//! shell converts screen coordinates through [`Camera::screen_to_world`]
//! first); outbound protocol messages come back as return values for the
//! shell to put on the socket.
//!
//! LIFECYCLE: `open` resets to a cold start and yields the join message.
//! Pointer events drive one gesture at a time. Freehand emits one command
//! per move; shapes preview locally against a pixel snapshot and emit a
//! single command on release. `close` finalizes whatever is in flight.
//!
//! ORDERING: render failures never stall the protocol. A failed local
//! render is logged and the command still returned for publication, so
//! every peer and the history log stay consistent with what was emitted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use wire::{ClientMessage, DrawCommand, Point, ServerMessage};

use crate::camera::Camera;
use crate::input::{Brush, Gesture};
use crate::raster::{RasterTarget, Snapshot};
use crate::render;

/// Client-side state for one room.
#[derive(Debug)]
pub struct DrawSession {
    room_id: String,
    pub brush: Brush,
    pub camera: Camera,
    gesture: Gesture,
}

impl DrawSession {
    #[must_use]
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            brush: Brush::default(),
            camera: Camera::default(),
            gesture: Gesture::Idle,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Whether a gesture is currently in flight.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    // =============================================================
    // Lifecycle
    // =============================================================

    /// Start (or restart) the session. Any in-flight gesture is dropped
    /// without emitting; the returned join triggers a history replay that
    /// repaints the surface from scratch.
    pub fn open(&mut self) -> ClientMessage {
        self.gesture = Gesture::Idle;
        ClientMessage::Join { room_id: self.room_id.clone() }
    }

    /// Finalize the session. An in-flight shape is committed at its last
    /// known pointer position, exactly as if the pointer had been
    /// released there.
    pub fn close(&mut self, raster: &mut dyn RasterTarget) -> Option<ClientMessage> {
        self.pointer_leave(raster)
    }

    // =============================================================
    // Pointer events
    // =============================================================

    /// Begin a gesture at `point`. Ignored while another gesture is in
    /// flight (a second button press mid-drag must not fork the state).
    pub fn pointer_down(&mut self, raster: &mut dyn RasterTarget, point: Point) {
        if self.gesture.is_active() {
            return;
        }
        if self.brush.effective_tool().is_shape() {
            let snapshot = match raster.snapshot() {
                Ok(snap) => Some(snap),
                Err(err) => {
                    // Preview frames will accumulate instead of replacing
                    // each other until release.
                    log::warn!("shape snapshot failed: {err}");
                    None
                }
            };
            self.gesture = Gesture::ActiveShape { start: point, last: point, snapshot };
        } else {
            self.gesture = Gesture::ActiveFreehand { prev: None };
        }
    }

    /// Advance the gesture to `point`.
    ///
    /// Freehand returns one draw message per call, chaining from the
    /// previous sample; the first sample of a stroke has no previous
    /// point and renders as a dot. Shape gestures only repaint the local
    /// preview and return nothing until release.
    pub fn pointer_move(
        &mut self,
        raster: &mut dyn RasterTarget,
        point: Point,
    ) -> Option<ClientMessage> {
        match &mut self.gesture {
            Gesture::Idle => None,
            Gesture::ActiveFreehand { prev } => {
                let cmd = command(&self.room_id, &self.brush, *prev, point);
                *prev = Some(point);
                if let Err(err) = render::draw(raster, &cmd) {
                    log::warn!("local render failed: {err}");
                }
                Some(ClientMessage::Draw(cmd))
            }
            Gesture::ActiveShape { start, last, snapshot } => {
                restore_or_drop(raster, snapshot);
                *last = point;
                let result = render::draw_parts(
                    raster,
                    self.brush.effective_tool(),
                    Some(*start),
                    point,
                    self.brush.effective_color(),
                    self.brush.effective_width(),
                );
                if let Err(err) = result {
                    log::warn!("shape preview failed: {err}");
                }
                None
            }
        }
    }

    /// End the gesture at `point`. Freehand has already emitted every
    /// segment and returns nothing; a shape commits exactly one command
    /// covering the whole drag.
    pub fn pointer_up(
        &mut self,
        raster: &mut dyn RasterTarget,
        point: Point,
    ) -> Option<ClientMessage> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::ActiveFreehand { .. } => None,
            Gesture::ActiveShape { start, snapshot, .. } => {
                Some(self.commit_shape(raster, start, snapshot, point))
            }
        }
    }

    /// The pointer left the surface (or the window lost it). Equivalent
    /// to a release at the last position the gesture saw.
    pub fn pointer_leave(&mut self, raster: &mut dyn RasterTarget) -> Option<ClientMessage> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::ActiveFreehand { .. } => None,
            Gesture::ActiveShape { start, last, snapshot } => {
                Some(self.commit_shape(raster, start, snapshot, last))
            }
        }
    }

    fn commit_shape(
        &mut self,
        raster: &mut dyn RasterTarget,
        start: Point,
        mut snapshot: Option<Snapshot>,
        end: Point,
    ) -> ClientMessage {
        restore_or_drop(raster, &mut snapshot);
        let cmd = command(&self.room_id, &self.brush, Some(start), end);
        if let Err(err) = render::draw(raster, &cmd) {
            log::warn!("local render failed: {err}");
        }
        ClientMessage::Draw(cmd)
    }

    // =============================================================
    // Room-wide actions and inbound traffic
    // =============================================================

    /// Clear the local surface and request a room-wide clear. Cancels any
    /// in-flight gesture; there is nothing left under it to finish.
    pub fn clear(&mut self, raster: &mut dyn RasterTarget) -> ClientMessage {
        self.gesture = Gesture::Idle;
        if let Err(err) = raster.clear() {
            log::warn!("local clear failed: {err}");
        }
        ClientMessage::ClearRoom { room_id: self.room_id.clone() }
    }

    /// Apply one inbound hub message to the surface.
    ///
    /// If a shape preview is in flight its snapshot is rebuilt around the
    /// remote change, so peer strokes land underneath the preview instead
    /// of being wiped by the next preview frame.
    pub fn apply_remote(&mut self, raster: &mut dyn RasterTarget, msg: &ServerMessage) {
        let preview = self.lift_preview(raster);
        match msg {
            ServerMessage::HistoryReplay { commands } => {
                if let Err(err) = raster.clear() {
                    log::warn!("replay clear failed: {err}");
                }
                for cmd in commands {
                    if let Err(err) = render::draw(raster, cmd) {
                        log::warn!("replay render failed: {err}");
                    }
                }
            }
            ServerMessage::Draw(cmd) => {
                if let Err(err) = render::draw(raster, cmd) {
                    log::warn!("remote render failed: {err}");
                }
            }
            ServerMessage::ClearRoom => {
                if let Err(err) = raster.clear() {
                    log::warn!("remote clear failed: {err}");
                }
            }
        }
        self.drop_preview(raster, preview);
    }

    /// The surface was resized. Snapshots never survive a resize, so an
    /// in-flight shape keeps previewing without its erase pass until
    /// release.
    pub fn surface_resized(&mut self) {
        if let Gesture::ActiveShape { snapshot, .. } = &mut self.gesture {
            *snapshot = None;
        }
    }

    /// Peel an in-flight shape preview off the surface so remote pixels
    /// can land under it. Returns the preview geometry to repaint.
    fn lift_preview(&mut self, raster: &mut dyn RasterTarget) -> Option<(Point, Point)> {
        if let Gesture::ActiveShape { start, last, snapshot } = &mut self.gesture {
            restore_or_drop(raster, snapshot);
            Some((*start, *last))
        } else {
            None
        }
    }

    /// Re-snapshot (now including the remote pixels) and repaint the
    /// lifted preview on top.
    fn drop_preview(&mut self, raster: &mut dyn RasterTarget, preview: Option<(Point, Point)>) {
        let Some((start, last)) = preview else { return };
        if let Gesture::ActiveShape { snapshot, .. } = &mut self.gesture {
            *snapshot = raster.snapshot().ok();
        }
        let result = render::draw_parts(
            raster,
            self.brush.effective_tool(),
            Some(start),
            last,
            self.brush.effective_color(),
            self.brush.effective_width(),
        );
        if let Err(err) = result {
            log::warn!("shape preview failed: {err}");
        }
    }
}

/// Restore a snapshot, dropping it if the surface rejects it (stale
/// after a resize, or the surface is gone).
fn restore_or_drop(raster: &mut dyn RasterTarget, snapshot: &mut Option<Snapshot>) {
    if let Some(snap) = snapshot.as_ref() {
        if let Err(err) = raster.restore(snap) {
            log::warn!("snapshot restore failed: {err}");
            *snapshot = None;
        }
    }
}

fn command(room_id: &str, brush: &Brush, prev: Option<Point>, current: Point) -> DrawCommand {
    DrawCommand {
        room_id: room_id.to_owned(),
        tool: brush.effective_tool(),
        prev_point: prev,
        current_point: current,
        color: brush.effective_color().to_owned(),
        stroke_width: brush.effective_width(),
    }
}
