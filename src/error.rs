//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the core and the
//! gateway. Each variant carries a stable `kind`, a numeric code and an
//! HTTP status, so handlers can turn any core failure into a structured
//! JSON response without the core knowing about transport.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ActivityId;
use crate::persistence::StoreError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "kind": "duplicate_access_code",
///     "message": "an activity with access code ABC123 already exists"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, kind and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Stable snake_case error kind.
    #[schema(value_type = String)]
    pub kind: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Core error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                  |
/// |-----------|---------------------|------------------------------|
/// | 1000–1999 | Validation          | 400 Bad Request              |
/// | 2000–2999 | Not Found/Conflict  | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server              | 500 Internal Server Error    |
/// | 4000–4999 | Activity rules      | 422 Unprocessable Entity     |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or malformed input.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Another activity already owns this access code.
    #[error("an activity with access code {0} already exists")]
    DuplicateAccessCode(String),

    /// No activity matches the given id or access code.
    #[error("activity not found: {0}")]
    ActivityNotFound(String),

    /// The stored activity is missing one or both time bounds.
    #[error("activity {0} has no complete time range")]
    IncompleteActivity(ActivityId),

    /// The submission arrived before the window opened or after it closed.
    #[error("feedback for activity {activity_id} is only accepted between {start} and {end}")]
    OutsideWindow {
        /// Target activity.
        activity_id: ActivityId,
        /// Window start.
        start: DateTime<Utc>,
        /// Window end.
        end: DateTime<Utc>,
        /// Instant the submission was evaluated at.
        attempted_at: DateTime<Utc>,
    },

    /// Underlying persistence failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the stable snake_case kind for this variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateAccessCode(_) => "duplicate_access_code",
            Self::ActivityNotFound(_) => "activity_not_found",
            Self::IncompleteActivity(_) => "incomplete_activity",
            Self::OutsideWindow { .. } => "outside_window",
            Self::Storage(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::ActivityNotFound(_) => 2001,
            Self::DuplicateAccessCode(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::OutsideWindow { .. } => 4001,
            Self::IncompleteActivity(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ActivityNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateAccessCode(_) => StatusCode::CONFLICT,
            Self::OutsideWindow { .. } | Self::IncompleteActivity(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "storage operation failed");
        Self::Storage(err.to_string())
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                kind: self.kind(),
                message: self.to_string(),
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_conflict() {
        let err = GatewayError::DuplicateAccessCode("ABC123".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), "duplicate_access_code");
        assert!(err.to_string().contains("ABC123"));
    }

    #[test]
    fn outside_window_is_unprocessable() {
        let now = Utc::now();
        let err = GatewayError::OutsideWindow {
            activity_id: ActivityId::new(),
            start: now,
            end: now,
            attempted_at: now,
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4001);
    }

    #[test]
    fn store_errors_become_storage_errors() {
        let err: GatewayError = StoreError::MissingReference("activity".to_string()).into();
        assert_eq!(err.kind(), "storage");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
