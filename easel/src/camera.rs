//! Pan/zoom camera for the canvas viewport.
//!
//! The camera is independent of drawing state: draw commands carry
//! canvas-relative coordinates and peers render them under their own
//! transforms. Zooming keeps the gesture's anchor point (cursor or pinch
//! centroid) visually fixed; the clamp is applied to the zoom level
//! *before* the pan is recomputed, otherwise the anchor identity breaks at
//! the zoom boundary.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use wire::Point;

use crate::consts::{
    PINCH_FACTOR_FLOOR, PINCH_ZOOM_RATE, TRACKPAD_ZOOM_RATE, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
    ZOOM_MAX, ZOOM_MIN,
};

/// Camera state for pan/zoom on the canvas.
///
/// `pan_x` / `pan_y` are in device pixels. `zoom` is a scale factor
/// clamped to `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Press point minus pan at drag-pan start; `Some` while panning.
    pan_origin: Option<Point>,
    /// Distance between the two pointers at the last pinch sample.
    last_pinch_distance: Option<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0, pan_origin: None, last_pinch_distance: None }
    }
}

impl Camera {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Zoom ---

    /// Scale the zoom level by `factor`, keeping `anchor` (a device-space
    /// point) visually fixed. Used by stepped and continuous input alike.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let old_zoom = self.zoom;
        // Clamp before recomputing pan; the pan formula must see the zoom
        // that will actually be applied.
        let new_zoom = (old_zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);

        let ratio = new_zoom / old_zoom;
        self.pan_x = anchor.x - (anchor.x - self.pan_x) * ratio;
        self.pan_y = anchor.y - (anchor.y - self.pan_y) * ratio;
        self.zoom = new_zoom;
    }

    /// Wheel input at `anchor`. A plain wheel zooms in fixed steps; a
    /// trackpad pinch (reported as ctrl+wheel) zooms continuously from the
    /// gesture delta.
    pub fn wheel_zoom(&mut self, anchor: Point, delta_y: f64, pinch_gesture: bool) {
        let factor = if pinch_gesture {
            1.0 - delta_y * TRACKPAD_ZOOM_RATE
        } else if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_at(anchor, factor);
    }

    // --- Drag-pan ---

    /// Begin a drag-pan at device point `p`.
    pub fn begin_pan(&mut self, p: Point) {
        self.pan_origin = Some(Point::new(p.x - self.pan_x, p.y - self.pan_y));
    }

    /// While panning, the offset tracks the pointer delta from the press
    /// point 1:1. No-op when not panning.
    pub fn pan_move(&mut self, p: Point) {
        if let Some(origin) = self.pan_origin {
            self.pan_x = p.x - origin.x;
            self.pan_y = p.y - origin.y;
        }
    }

    /// End the drag-pan.
    pub fn end_pan(&mut self) {
        self.pan_origin = None;
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_origin.is_some()
    }

    // --- Two-pointer pinch ---

    /// One pinch sample: the distance delta since the previous sample maps
    /// to zoom with the centroid as anchor. The first sample of a pinch
    /// only establishes the baseline distance.
    pub fn pinch_update(&mut self, centroid: Point, distance: f64) {
        let delta = distance - self.last_pinch_distance.unwrap_or(distance);
        // The factor must stay positive: a wild sample would otherwise
        // flip the pan math and pin the zoom at its lower bound.
        let factor = (1.0 + delta * PINCH_ZOOM_RATE).max(PINCH_FACTOR_FLOOR);
        self.zoom_at(centroid, factor);
        self.last_pinch_distance = Some(distance);
    }

    /// A pointer lifted; the pinch is over.
    pub fn pinch_end(&mut self) {
        self.last_pinch_distance = None;
    }

    // --- Coordinate conversions ---

    /// Convert a device-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to device coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }
}
