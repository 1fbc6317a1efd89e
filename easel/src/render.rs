//! Primitive renderer: one draw command in, pixels out.
//!
//! Every function here is stateless and deterministic — the same command
//! against the same target always produces the same pixels, whether it
//! came from the local gesture, a peer's fan-out, or a history replay.
//! Side effects are confined to the supplied [`RasterTarget`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wire::{DrawCommand, Point, Tool};

use crate::consts::{ARROW_ANGLE, ARROW_BASE_LEN, ARROW_LEN_PER_WIDTH};
use crate::raster::{RasterError, RasterTarget};

/// Render one draw command.
///
/// # Errors
///
/// Propagates the first raster failure; the target is left with whatever
/// was drawn before it.
pub fn draw(target: &mut dyn RasterTarget, cmd: &DrawCommand) -> Result<(), RasterError> {
    draw_parts(target, cmd.tool, cmd.prev_point, cmd.current_point, &cmd.color, cmd.stroke_width)
}

/// Render a primitive from its parts. Shape previews use this directly,
/// before any command exists.
///
/// # Errors
///
/// Propagates the first raster failure.
pub fn draw_parts(
    target: &mut dyn RasterTarget,
    tool: Tool,
    prev: Option<Point>,
    current: Point,
    color: &str,
    width: f64,
) -> Result<(), RasterError> {
    match tool {
        Tool::Freehand => freehand(target, prev, current, color, width),
        Tool::Rectangle | Tool::Ellipse | Tool::Arrow => {
            // A shape without an anchor corner renders nothing.
            let Some(prev) = prev else { return Ok(()) };
            match tool {
                Tool::Rectangle => rectangle(target, prev, current, color, width),
                Tool::Ellipse => ellipse(target, prev, current, color, width),
                _ => arrow(target, prev, current, color, width),
            }
        }
    }
}

// =============================================================
// Geometry
// =============================================================

/// Normalized rectangle from two opposite corners: origin plus
/// non-negative extent, identical for any drag direction.
#[must_use]
pub fn rect_bounds(a: Point, b: Point) -> (Point, f64, f64) {
    let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
    (origin, (a.x - b.x).abs(), (a.y - b.y).abs())
}

/// Ellipse inscribed in the bounding box `a..b`: center at the midpoint,
/// radii half the absolute per-axis span.
#[must_use]
pub fn ellipse_geometry(a: Point, b: Point) -> (Point, f64, f64) {
    let center = Point::new(a.x + (b.x - a.x) / 2.0, a.y + (b.y - a.y) / 2.0);
    (center, ((b.x - a.x) / 2.0).abs(), ((b.y - a.y) / 2.0).abs())
}

/// The two arrowhead endpoints for a shaft `from → to`, each
/// `10 + 2·width` back from the tip at ±30° off the shaft angle.
#[must_use]
pub fn arrow_head(from: Point, to: Point, width: f64) -> [Point; 2] {
    let head_len = ARROW_BASE_LEN + ARROW_LEN_PER_WIDTH * width;
    let angle = (to.y - from.y).atan2(to.x - from.x);
    [
        Point::new(
            to.x - head_len * (angle - ARROW_ANGLE).cos(),
            to.y - head_len * (angle - ARROW_ANGLE).sin(),
        ),
        Point::new(
            to.x - head_len * (angle + ARROW_ANGLE).cos(),
            to.y - head_len * (angle + ARROW_ANGLE).sin(),
        ),
    ]
}

// =============================================================
// Primitives
// =============================================================

fn freehand(
    target: &mut dyn RasterTarget,
    prev: Option<Point>,
    current: Point,
    color: &str,
    width: f64,
) -> Result<(), RasterError> {
    let start = prev.unwrap_or(current);
    target.stroke_line(start, current, color, width)?;
    // Disc at the segment start rounds joints and masks gaps left by
    // fast pointer sampling.
    target.fill_disc(start, width / 2.0, color)
}

fn rectangle(
    target: &mut dyn RasterTarget,
    a: Point,
    b: Point,
    color: &str,
    width: f64,
) -> Result<(), RasterError> {
    let (origin, w, h) = rect_bounds(a, b);
    target.stroke_rect(origin, w, h, color, width)
}

fn ellipse(
    target: &mut dyn RasterTarget,
    a: Point,
    b: Point,
    color: &str,
    width: f64,
) -> Result<(), RasterError> {
    let (center, rx, ry) = ellipse_geometry(a, b);
    target.stroke_ellipse(center, rx, ry, color, width)
}

fn arrow(
    target: &mut dyn RasterTarget,
    from: Point,
    to: Point,
    color: &str,
    width: f64,
) -> Result<(), RasterError> {
    target.stroke_line(from, to, color, width)?;
    let [left, right] = arrow_head(from, to, width);
    target.stroke_line(to, left, color, width)?;
    target.stroke_line(to, right, color, width)
}
