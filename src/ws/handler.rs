//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::{ActivityId, Topic};

/// Query parameters accepted on `/ws`.
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    /// Follow a single activity instead of every activity.
    pub activity_id: Option<ActivityId>,
}

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// The observer is registered before the upgrade completes, so feedback
/// accepted after the handshake is never missed.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> impl IntoResponse {
    let topic = params.activity_id.map_or(Topic::Global, Topic::Activity);
    let subscription = state.event_bus.subscribe(topic);

    ws.on_upgrade(move |socket| run_connection(socket, subscription))
}
