//! Activity handlers: create, list history, resolve by access code.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ActivityHistoryEntry, ActivityResponse, CreateActivityRequest};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /activities` — Create a new activity.
///
/// # Errors
///
/// Returns [`GatewayError`] on missing fields, an inverted time range, or
/// an access code that is already taken.
#[utoipa::path(
    post,
    path = "/api/v1/activities",
    tag = "Activities",
    summary = "Create an activity",
    description = "Registers a time-boxed activity. The access code must be unique across all activities.",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse),
        (status = 400, description = "Malformed body, missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Access code already in use", body = ErrorResponse),
    )
)]
pub async fn create_activity(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let input = req.into_new_activity()?;
    let activity = state.registry.create_activity(input).await?;
    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))))
}

/// `GET /activities` — List all activities with their feedback.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    tag = "Activities",
    summary = "List activity history",
    description = "Returns every activity with its feedback attached, oldest feedback first.",
    responses(
        (status = 200, description = "Activity history", body = Vec<ActivityHistoryEntry>),
    )
)]
pub async fn list_activities(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let history: Vec<ActivityHistoryEntry> = state
        .registry
        .list_all()
        .await?
        .into_iter()
        .map(ActivityHistoryEntry::from)
        .collect();
    Ok(Json(history))
}

/// `GET /activities/{code}` — Resolve an access code.
///
/// # Errors
///
/// Returns [`GatewayError::ActivityNotFound`] if no activity uses the code.
#[utoipa::path(
    get,
    path = "/api/v1/activities/{code}",
    tag = "Activities",
    summary = "Join by access code",
    description = "Looks up an activity by its exact access code.",
    params(
        ("code" = String, Path, description = "Access code, matched exactly"),
    ),
    responses(
        (status = 200, description = "Activity found", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse),
    )
)]
pub async fn get_activity_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let activity = state.registry.find_by_access_code(&code).await?;
    Ok(Json(ActivityResponse::from(activity)))
}

/// Activity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", post(create_activity).get(list_activities))
        .route("/activities/{code}", get(get_activity_by_code))
}
