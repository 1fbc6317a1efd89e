use super::*;

use wire::Tool;

use crate::consts::{BACKGROUND_COLOR, ERASER_WIDTH};
use crate::raster::Bitmap;

const WHITE: u32 = 0x00FF_FFFF;
const BG: u32 = 0x000A_0A0A;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn session() -> DrawSession {
    DrawSession::new("room-1")
}

fn expect_draw(msg: Option<ClientMessage>) -> DrawCommand {
    match msg {
        Some(ClientMessage::Draw(cmd)) => cmd,
        other => panic!("expected a draw message, got {other:?}"),
    }
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn open_returns_join_for_the_session_room() {
    let mut session = session();
    assert_eq!(session.open(), ClientMessage::Join { room_id: "room-1".into() });
}

#[test]
fn open_drops_an_in_flight_gesture() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(4.0, 4.0));
    assert!(session.is_drawing());

    session.open();
    assert!(!session.is_drawing());
    // A move after the reset is a no-op, not a stroke continuation.
    assert!(session.pointer_move(&mut bmp, p(8.0, 8.0)).is_none());
}

// =============================================================
// Freehand gestures
// =============================================================

#[test]
fn freehand_emits_one_command_per_move() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(2.0, 2.0));

    let first = expect_draw(session.pointer_move(&mut bmp, p(4.0, 4.0)));
    let second = expect_draw(session.pointer_move(&mut bmp, p(8.0, 8.0)));
    let third = expect_draw(session.pointer_move(&mut bmp, p(12.0, 8.0)));

    // The first sample of a stroke has no previous point; every later
    // sample chains from the one before it.
    assert_eq!(first.prev_point, None);
    assert_eq!(first.current_point, p(4.0, 4.0));
    assert_eq!(second.prev_point, Some(p(4.0, 4.0)));
    assert_eq!(third.prev_point, Some(p(8.0, 8.0)));
    assert_eq!(third.room_id, "room-1");

    // Release ends the stroke without another command.
    assert!(session.pointer_up(&mut bmp, p(12.0, 8.0)).is_none());
    assert!(!session.is_drawing());
}

#[test]
fn freehand_renders_locally_as_it_emits() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(4.0, 16.0));
    session.pointer_move(&mut bmp, p(28.0, 16.0));
    assert_eq!(bmp.pixel(4, 16), Some(WHITE));
    assert_eq!(bmp.pixel(16, 16), Some(WHITE));
}

#[test]
fn pointer_down_while_active_is_ignored() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(4.0, 4.0));

    // Second press mid-stroke must not restart the chain.
    session.pointer_down(&mut bmp, p(20.0, 20.0));
    let next = expect_draw(session.pointer_move(&mut bmp, p(6.0, 6.0)));
    assert_eq!(next.prev_point, Some(p(4.0, 4.0)));
}

#[test]
fn moves_while_idle_emit_nothing() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    assert!(session.pointer_move(&mut bmp, p(4.0, 4.0)).is_none());
    assert!(session.pointer_up(&mut bmp, p(4.0, 4.0)).is_none());
    assert!(session.pointer_leave(&mut bmp).is_none());
}

#[test]
fn eraser_strokes_carry_background_color_and_fixed_width() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;
    session.brush.eraser = true;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    let cmd = expect_draw(session.pointer_move(&mut bmp, p(8.0, 8.0)));

    // The eraser is a wide freehand stroke in the background color,
    // whatever tool was selected underneath it.
    assert_eq!(cmd.tool, Tool::Freehand);
    assert_eq!(cmd.color, BACKGROUND_COLOR);
    assert!((cmd.stroke_width - ERASER_WIDTH).abs() < f64::EPSILON);
}

// =============================================================
// Shape gestures
// =============================================================

#[test]
fn shape_emits_nothing_until_release_then_one_command() {
    let mut bmp = Bitmap::new(40, 40);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    assert!(session.pointer_move(&mut bmp, p(10.0, 10.0)).is_none());
    assert!(session.pointer_move(&mut bmp, p(20.0, 20.0)).is_none());

    let cmd = expect_draw(session.pointer_up(&mut bmp, p(30.0, 25.0)));
    assert_eq!(cmd.tool, Tool::Rectangle);
    assert_eq!(cmd.prev_point, Some(p(2.0, 2.0)));
    // The commit covers the release point, not the last move.
    assert_eq!(cmd.current_point, p(30.0, 25.0));
    assert!(!session.is_drawing());
}

#[test]
fn shape_preview_replaces_the_previous_frame() {
    let mut bmp = Bitmap::new(40, 40);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(30.0, 30.0));
    assert_eq!(bmp.pixel(16, 2), Some(WHITE));

    // Shrinking the drag erases the larger preview.
    session.pointer_move(&mut bmp, p(10.0, 10.0));
    assert_eq!(bmp.pixel(16, 2), Some(BG));
    assert_eq!(bmp.pixel(6, 2), Some(WHITE));
}

#[test]
fn release_erases_the_preview_before_the_final_shape() {
    let mut bmp = Bitmap::new(40, 40);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(30.0, 30.0));
    session.pointer_up(&mut bmp, p(10.0, 10.0));

    // Only the committed 2,2..10,10 rectangle remains.
    assert_eq!(bmp.pixel(16, 2), Some(BG));
    assert_eq!(bmp.pixel(6, 2), Some(WHITE));
}

#[test]
fn pointer_leave_commits_the_shape_at_its_last_position() {
    let mut bmp = Bitmap::new(40, 40);
    let mut session = session();
    session.brush.tool = Tool::Ellipse;

    session.pointer_down(&mut bmp, p(5.0, 5.0));
    session.pointer_move(&mut bmp, p(25.0, 15.0));

    let cmd = expect_draw(session.pointer_leave(&mut bmp));
    assert_eq!(cmd.tool, Tool::Ellipse);
    assert_eq!(cmd.prev_point, Some(p(5.0, 5.0)));
    assert_eq!(cmd.current_point, p(25.0, 15.0));
    assert!(!session.is_drawing());
}

#[test]
fn pointer_leave_during_freehand_emits_nothing() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(8.0, 8.0));
    assert!(session.pointer_leave(&mut bmp).is_none());
    assert!(!session.is_drawing());
}

#[test]
fn resize_mid_shape_still_commits() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(10.0, 10.0));

    bmp.resize(64, 64);
    session.surface_resized();

    // The stale snapshot is gone; previews accumulate but the gesture
    // still finishes cleanly.
    session.pointer_move(&mut bmp, p(20.0, 20.0));
    let cmd = expect_draw(session.pointer_up(&mut bmp, p(24.0, 24.0)));
    assert_eq!(cmd.prev_point, Some(p(2.0, 2.0)));
    assert_eq!(cmd.current_point, p(24.0, 24.0));
}

// =============================================================
// Clear and inbound traffic
// =============================================================

#[test]
fn clear_wipes_the_surface_and_cancels_the_gesture() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();
    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(16.0, 16.0));
    assert!(bmp.painted_count() > 0);

    let msg = session.clear(&mut bmp);
    assert_eq!(msg, ClientMessage::ClearRoom { room_id: "room-1".into() });
    assert_eq!(bmp.painted_count(), 0);
    assert!(!session.is_drawing());
}

#[test]
fn history_replay_repaints_from_scratch() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();

    // Stale local pixels from before a reconnect.
    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(2.0, 30.0));
    session.pointer_up(&mut bmp, p(2.0, 30.0));
    assert_eq!(bmp.pixel(2, 16), Some(WHITE));

    let replay = ServerMessage::HistoryReplay {
        commands: vec![DrawCommand {
            room_id: "room-1".into(),
            tool: Tool::Freehand,
            prev_point: Some(p(20.0, 4.0)),
            current_point: p(20.0, 28.0),
            color: "#22d3ee".into(),
            stroke_width: 2.0,
        }],
    };
    session.apply_remote(&mut bmp, &replay);

    assert_eq!(bmp.pixel(2, 16), Some(BG));
    assert_eq!(bmp.pixel(20, 16), Some(0x0022_D3EE));
}

#[test]
fn remote_draw_and_clear_apply_to_the_surface() {
    let mut bmp = Bitmap::new(32, 32);
    let mut session = session();

    let cmd = DrawCommand {
        room_id: "room-1".into(),
        tool: Tool::Freehand,
        prev_point: Some(p(4.0, 16.0)),
        current_point: p(28.0, 16.0),
        color: "#ffffff".into(),
        stroke_width: 2.0,
    };
    session.apply_remote(&mut bmp, &ServerMessage::Draw(cmd));
    assert_eq!(bmp.pixel(16, 16), Some(WHITE));

    session.apply_remote(&mut bmp, &ServerMessage::ClearRoom);
    assert_eq!(bmp.painted_count(), 0);
}

#[test]
fn remote_draw_survives_later_preview_frames() {
    let mut bmp = Bitmap::new(40, 40);
    let mut session = session();
    session.brush.tool = Tool::Rectangle;

    session.pointer_down(&mut bmp, p(2.0, 2.0));
    session.pointer_move(&mut bmp, p(12.0, 12.0));

    // A peer stroke lands while the preview is up.
    let cmd = DrawCommand {
        room_id: "room-1".into(),
        tool: Tool::Freehand,
        prev_point: Some(p(30.0, 4.0)),
        current_point: p(30.0, 36.0),
        color: "#ffffff".into(),
        stroke_width: 2.0,
    };
    session.apply_remote(&mut bmp, &ServerMessage::Draw(cmd));

    // The next preview frame must not erase it.
    session.pointer_move(&mut bmp, p(20.0, 20.0));
    assert_eq!(bmp.pixel(30, 20), Some(WHITE));

    session.pointer_up(&mut bmp, p(20.0, 20.0));
    assert_eq!(bmp.pixel(30, 20), Some(WHITE));
}
