//! WebSocket handler — the room broadcast hub's transport edge.
//!
//! DESIGN
//! ======
//! On upgrade, generates a connection id and enters a `select!` loop:
//! - Inbound client messages → parse + dispatch to the room service
//! - Fan-out messages from room peers → forward to this client
//!
//! The handler owns only transport concerns. Room semantics (membership,
//! the append-only log, eviction) live in [`crate::services::room`].
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → loop. A connection may join several rooms over its life.
//! 2. `join` replies with the full history replay to this socket only.
//! 3. `draw` / `clear_room` mutate the room and fan out, excluding the
//!    sender — a client must never see its own command echoed back.
//! 4. Close (or transport error) → disconnect cleanup runs exactly once.

use std::collections::{HashMap, HashSet};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;
use wire::{ClientMessage, ServerMessage};

use crate::services::room;
use crate::state::AppState;

pub async fn handle_ws(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    // The bearer credential is opaque here; issuance and validation are an
    // upstream collaborator's concern.
    let has_token = params.contains_key("token");
    ws.on_upgrade(move |socket| run_ws(socket, state, has_token))
}

async fn run_ws(mut socket: WebSocket, state: AppState, has_token: bool) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for fan-out messages from room peers.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerMessage>(256);

    // Rooms this connection has joined, for disconnect cleanup.
    let mut joined: HashSet<String> = HashSet::new();

    info!(%client_id, has_token, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let reply = dispatch(&state, &mut joined, client_id, &client_tx, &text).await;
                        if let Some(reply) = reply {
                            if send_message(&mut socket, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(msg) = client_rx.recv() => {
                if send_message(&mut socket, &msg).await.is_err() {
                    break;
                }
            }
        }
    }

    // Runs exactly once per connection, on any exit path above.
    let rooms: Vec<String> = joined.into_iter().collect();
    room::disconnect(&state, client_id, &rooms).await;
    info!(%client_id, "ws: client disconnected");
}

/// Parse one inbound text message and dispatch it. Returns the reply for
/// the sender, if any — only `join` answers, with the history replay.
///
/// Malformed input is dropped silently: logged, never forwarded, never an
/// error reply.
async fn dispatch(
    state: &AppState,
    joined: &mut HashSet<String>,
    client_id: Uuid,
    client_tx: &mpsc::Sender<ServerMessage>,
    text: &str,
) -> Option<ServerMessage> {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: dropped unparseable message");
            return None;
        }
    };

    match msg {
        ClientMessage::Join { room_id } => {
            let commands = room::join(state, &room_id, client_id, client_tx.clone()).await;
            joined.insert(room_id);
            Some(ServerMessage::HistoryReplay { commands })
        }
        ClientMessage::Draw(command) => {
            if let Err(e) = command.validate() {
                warn!(%client_id, error = %e, "ws: dropped malformed command");
                return None;
            }
            room::publish(state, client_id, command).await;
            None
        }
        ClientMessage::ClearRoom { room_id } => {
            room::clear(state, client_id, &room_id).await;
            None
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), ()> {
    let json = match serde_json::to_string(msg) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize message");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
