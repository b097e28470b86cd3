//! System endpoints: health check and emoticon policy.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::EmoticonPolicy;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    store: String,
    observers: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, storage backend, and the number of live observers.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: state.store_backend.to_string(),
            observers: state.event_bus.receiver_count(),
        }),
    )
}

/// Emoticon policy as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmoticonPolicyResponse {
    /// `"permissive"` or `"allow_list"`.
    mode: String,
    /// Accepted tokens; empty when permissive.
    emoticons: Vec<String>,
}

impl From<&EmoticonPolicy> for EmoticonPolicyResponse {
    fn from(policy: &EmoticonPolicy) -> Self {
        match policy {
            EmoticonPolicy::Permissive => Self {
                mode: "permissive".to_string(),
                emoticons: Vec::new(),
            },
            EmoticonPolicy::AllowList(list) => Self {
                mode: "allow_list".to_string(),
                emoticons: list.clone(),
            },
        }
    }
}

/// `GET /config/emoticons` — Emoticons accepted by the feedback gate.
#[utoipa::path(
    get,
    path = "/config/emoticons",
    tag = "System",
    summary = "Accepted emoticons",
    description = "Returns the emoticon policy the feedback gate enforces.",
    responses(
        (status = 200, description = "Emoticon policy", body = EmoticonPolicyResponse),
    )
)]
pub async fn emoticons_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(EmoticonPolicyResponse::from(state.feedback_gate.policy()))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/emoticons", get(emoticons_handler))
}
