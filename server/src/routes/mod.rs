//! Router assembly.
//!
//! The hub exposes exactly two endpoints: the websocket upgrade at `/ws`
//! and a health probe. A permissive CORS layer mirrors the cross-origin
//! posture of the surrounding application; credential validation and room
//! directory lookups live upstream of this service.

pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
