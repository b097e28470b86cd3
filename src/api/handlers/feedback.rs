//! Feedback handlers: submit a reaction, list an activity's feedback.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{FeedbackResponse, SubmitFeedbackRequest};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::ActivityId;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /feedback` — Submit a reaction.
///
/// # Errors
///
/// Returns [`GatewayError`] if the input is invalid, the activity is
/// unknown, or the activity is not currently open.
#[utoipa::path(
    post,
    path = "/api/v1/feedback",
    tag = "Feedback",
    summary = "Submit feedback",
    description = "Records a reaction for an activity if the current time lies within its window, then pushes it to live observers.",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback accepted", body = FeedbackResponse),
        (status = 400, description = "Malformed body, missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse),
        (status = 422, description = "Activity closed, not yet open, or incomplete", body = ErrorResponse),
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SubmitFeedbackRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let (activity_id, emoticon) = req.into_parts()?;
    let feedback = state.feedback_gate.submit(activity_id, emoticon).await?;
    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(feedback))))
}

/// `GET /feedback/{activity_id}` — List feedback for an activity.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/feedback/{activity_id}",
    tag = "Feedback",
    summary = "List feedback",
    description = "Returns the feedback recorded for an activity, oldest first. Unknown ids yield an empty list.",
    params(
        ("activity_id" = uuid::Uuid, Path, description = "Activity UUID"),
    ),
    responses(
        (status = 200, description = "Feedback list", body = Vec<FeedbackResponse>),
    )
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let feedback: Vec<FeedbackResponse> = state
        .feedback_gate
        .list_for_activity(ActivityId::from_uuid(id))
        .await?
        .into_iter()
        .map(FeedbackResponse::from)
        .collect();
    Ok(Json(feedback))
}

/// Feedback routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback))
        .route("/feedback/{activity_id}", get(list_feedback))
}
