//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds a map of live room states keyed by the opaque room identifier.
//! Each room owns an append-only log of draw commands and the channels of
//! its connected clients.
//!
//! The single `RwLock` write path is the serialization point the protocol
//! requires: join, publish, clear, and disconnect for one room key execute
//! in a total order, and eviction can never interleave with a concurrent
//! join on the same key.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;
use wire::{DrawCommand, ServerMessage};

/// Per-room live state. History is intentionally ephemeral: it lives only
/// in memory and is deleted when the last member disconnects.
pub struct RoomState {
    /// Ordered, append-only log of draw commands since creation or the
    /// last clear.
    pub history: Vec<DrawCommand>,
    /// Connected clients: `client_id` -> sender for outgoing messages.
    pub clients: HashMap<Uuid, mpsc::Sender<ServerMessage>>,
}

impl RoomState {
    #[must_use]
    pub fn new() -> Self {
        Self { history: Vec::new(), clients: HashMap::new() }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state. Clone is required by Axum — the room map is
/// Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<String, RoomState>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Arc::new(RwLock::new(HashMap::new())) }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
