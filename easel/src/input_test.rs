use super::*;

// =============================================================
// Brush
// =============================================================

#[test]
fn brush_default_is_freehand_pen() {
    let brush = Brush::default();
    assert_eq!(brush.tool, Tool::Freehand);
    assert_eq!(brush.color, DEFAULT_COLOR);
    assert!((brush.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
    assert!(!brush.eraser);
}

#[test]
fn eraser_forces_freehand_over_any_tool() {
    for tool in [Tool::Freehand, Tool::Rectangle, Tool::Ellipse, Tool::Arrow] {
        let brush = Brush { tool, eraser: true, ..Brush::default() };
        assert_eq!(brush.effective_tool(), Tool::Freehand);
    }
}

#[test]
fn eraser_forces_background_color_and_fixed_width() {
    let brush = Brush {
        color: "#ff0000".into(),
        stroke_width: 2.0,
        eraser: true,
        ..Brush::default()
    };
    assert_eq!(brush.effective_color(), BACKGROUND_COLOR);
    assert!((brush.effective_width() - ERASER_WIDTH).abs() < f64::EPSILON);
}

#[test]
fn disabling_eraser_reverts_immediately() {
    let mut brush = Brush {
        tool: Tool::Ellipse,
        color: "#ff0000".into(),
        stroke_width: 2.0,
        eraser: true,
        ..Brush::default()
    };
    brush.eraser = false;
    assert_eq!(brush.effective_tool(), Tool::Ellipse);
    assert_eq!(brush.effective_color(), "#ff0000");
    assert!((brush.effective_width() - 2.0).abs() < f64::EPSILON);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_default_is_idle() {
    assert!(!Gesture::default().is_active());
}

#[test]
fn active_variants_report_active() {
    assert!(Gesture::ActiveFreehand { prev: None }.is_active());
    let shape = Gesture::ActiveShape {
        start: Point::new(0.0, 0.0),
        last: Point::new(0.0, 0.0),
        snapshot: None,
    };
    assert!(shape.is_active());
}
