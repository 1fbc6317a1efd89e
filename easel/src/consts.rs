//! Shared numeric constants for the easel crate.

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom bound.
pub const ZOOM_MIN: f64 = 0.1;

/// Upper zoom bound.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplicative factor for one stepped wheel notch zooming in.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Multiplicative factor for one stepped wheel notch zooming out.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Continuous zoom rate per unit of trackpad pinch delta (ctrl-wheel).
pub const TRACKPAD_ZOOM_RATE: f64 = 0.01;

/// Zoom rate per pixel of two-pointer pinch distance delta.
pub const PINCH_ZOOM_RATE: f64 = 0.005;

/// Smallest zoom factor one pinch sample may apply. Keeps a wild distance
/// delta (a pointer teleporting between samples) from producing a zero or
/// negative factor.
pub const PINCH_FACTOR_FLOOR: f64 = 0.1;

// ── Drawing ─────────────────────────────────────────────────────

/// Canvas background color. Doubles as the eraser's stroke color.
pub const BACKGROUND_COLOR: &str = "#0A0A0A";

/// Default brush color.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Default stroke width in canvas units.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Fixed width the eraser forces, regardless of the selected width.
pub const ERASER_WIDTH: f64 = 10.0;

// ── Arrowheads ──────────────────────────────────────────────────

/// Arrowhead half-angle from the shaft (30°).
pub const ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Arrowhead length base; the full length is `10 + 2 · width`.
pub const ARROW_BASE_LEN: f64 = 10.0;

/// Arrowhead length contribution per unit of stroke width.
pub const ARROW_LEN_PER_WIDTH: f64 = 2.0;
