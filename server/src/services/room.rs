//! Room service — join, publish, clear, disconnect, and fan-out.
//!
//! DESIGN
//! ======
//! Rooms are created implicitly on first contact and destroyed when the
//! last member disconnects. History is never persisted: a room's log is an
//! in-memory `Vec` and eviction deletes it outright.
//!
//! ORDERING
//! ========
//! `publish` appends to the log and fans out to peers under one write
//! guard, so every member observes commands in hub arrival order. The
//! per-client mpsc channels are FIFO, which carries that order to the
//! sockets.

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;
use wire::{DrawCommand, ServerMessage};

use crate::state::{AppState, RoomState};

/// Join a room, creating it with an empty log if absent.
/// Returns a clone of the ordered log; the caller replays it to the
/// joining connection only.
pub async fn join(
    state: &AppState,
    room_id: &str,
    client_id: Uuid,
    tx: mpsc::Sender<ServerMessage>,
) -> Vec<DrawCommand> {
    let mut rooms = state.rooms.write().await;
    let room = rooms.entry(room_id.to_owned()).or_insert_with(RoomState::new);
    room.clients.insert(client_id, tx);

    info!(%client_id, room_id, members = room.clients.len(), "client joined room");
    room.history.clone()
}

/// Append a command to its room's log and forward it to every other
/// member. The log entry is created on demand; the append is
/// unconditional.
pub async fn publish(state: &AppState, sender_id: Uuid, command: DrawCommand) {
    let mut rooms = state.rooms.write().await;
    let room = rooms
        .entry(command.room_id.clone())
        .or_insert_with(RoomState::new);
    room.history.push(command.clone());

    // Fan-out happens under the same guard as the append so no member can
    // observe commands out of hub arrival order.
    send_to_members(room, &ServerMessage::Draw(command), Some(sender_id));
}

/// Truncate a room's log and tell every other member to clear. The sender
/// already cleared locally, so it is excluded.
pub async fn clear(state: &AppState, sender_id: Uuid, room_id: &str) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(room_id) else {
        return;
    };
    room.history.clear();
    info!(%sender_id, room_id, "room log cleared");

    send_to_members(room, &ServerMessage::ClearRoom, Some(sender_id));
}

/// Remove a client from every room it joined. Rooms whose membership drops
/// to zero are evicted, log and all. Idempotent: repeating the call for a
/// client that is already gone is a no-op.
pub async fn disconnect(state: &AppState, client_id: Uuid, joined: &[String]) {
    let mut rooms = state.rooms.write().await;
    for room_id in joined {
        let Some(room) = rooms.get_mut(room_id) else {
            continue;
        };
        room.clients.remove(&client_id);
        info!(%client_id, room_id, remaining = room.clients.len(), "client left room");

        if room.clients.is_empty() {
            rooms.remove(room_id);
            info!(room_id, "evicted empty room");
        }
    }
}

/// Broadcast a message to all members of a room, optionally excluding one.
pub async fn broadcast(state: &AppState, room_id: &str, msg: &ServerMessage, exclude: Option<Uuid>) {
    let rooms = state.rooms.read().await;
    let Some(room) = rooms.get(room_id) else {
        return;
    };
    send_to_members(room, msg, exclude);
}

fn send_to_members(room: &RoomState, msg: &ServerMessage, exclude: Option<Uuid>) {
    for (client_id, tx) in &room.clients {
        if exclude == Some(*client_id) {
            continue;
        }
        // Best-effort: a full or closed channel skips that member.
        let _ = tx.try_send(msg.clone());
    }
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
