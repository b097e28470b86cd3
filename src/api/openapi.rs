//! OpenAPI document for the REST surface.

use axum::Router;
use utoipa::OpenApi;

use super::dto::{
    ActivityHistoryEntry, ActivityResponse, CreateActivityRequest, FeedbackResponse,
    SubmitFeedbackRequest,
};
use super::handlers::{activity, feedback, system};
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the generated OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Aggregated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        activity::create_activity,
        activity::list_activities,
        activity::get_activity_by_code,
        feedback::submit_feedback,
        feedback::list_feedback,
        system::health_handler,
        system::emoticons_handler,
    ),
    components(schemas(
        CreateActivityRequest,
        ActivityResponse,
        ActivityHistoryEntry,
        SubmitFeedbackRequest,
        FeedbackResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
        system::EmoticonPolicyResponse,
    )),
    tags(
        (name = "Activities", description = "Create and join feedback activities"),
        (name = "Feedback", description = "Submit and read reactions"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document, plus Swagger UI when the `swagger-ui`
/// feature is enabled.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Serves the OpenAPI document, plus Swagger UI when the `swagger-ui`
/// feature is enabled.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
