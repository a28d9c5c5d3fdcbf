//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;

use super::connection::run_connection;
use super::messages::HandshakeParams;
use crate::app_state::AppState;

/// `GET /ws[?userId=<id>]` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<HandshakeParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let presence_service = std::sync::Arc::clone(&state.presence_service);
    let handshake_user = params.user_id();

    ws.on_upgrade(move |socket| run_connection(socket, presence_service, handshake_user))
}
