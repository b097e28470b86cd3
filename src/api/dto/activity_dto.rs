//! Activity DTOs for create, lookup, and history listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::feedback_dto::FeedbackResponse;
use crate::domain::{Activity, ActivityId, ActivityWithFeedback, NewActivity};
use crate::error::GatewayError;

/// Request body for `POST /activities`.
///
/// Fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a body rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    /// Free-text label.
    #[serde(default)]
    pub description: Option<String>,
    /// Unique code students use to join.
    #[serde(default)]
    pub access_code: Option<String>,
    /// Window start (ISO-8601).
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Window end (ISO-8601); must be after `start_time`.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl CreateActivityRequest {
    /// Checks presence of every field and builds a [`NewActivity`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] naming the first missing
    /// field.
    pub fn into_new_activity(self) -> Result<NewActivity, GatewayError> {
        let missing = |field: &str| GatewayError::Validation(format!("missing field: {field}"));
        Ok(NewActivity {
            description: self.description.ok_or_else(|| missing("description"))?,
            access_code: self.access_code.ok_or_else(|| missing("access_code"))?,
            start_time: self.start_time.ok_or_else(|| missing("start_time"))?,
            end_time: self.end_time.ok_or_else(|| missing("end_time"))?,
        })
    }
}

/// A single activity as returned by create and lookup endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    /// Activity identifier.
    pub id: ActivityId,
    /// Free-text label.
    pub description: String,
    /// Access code.
    pub access_code: String,
    /// Window start.
    pub start_time: Option<DateTime<Utc>>,
    /// Window end.
    pub end_time: Option<DateTime<Utc>>,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            description: activity.description,
            access_code: activity.access_code,
            start_time: activity.start_time,
            end_time: activity.end_time,
            created_at: activity.created_at,
        }
    }
}

/// One entry of `GET /activities`: an activity with its feedback.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityHistoryEntry {
    /// Activity identifier.
    pub id: ActivityId,
    /// Free-text label.
    pub description: String,
    /// Access code.
    pub access_code: String,
    /// Window start.
    pub start_time: Option<DateTime<Utc>>,
    /// Window end.
    pub end_time: Option<DateTime<Utc>>,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Feedback received, oldest first.
    pub feedback: Vec<FeedbackResponse>,
}

impl From<ActivityWithFeedback> for ActivityHistoryEntry {
    fn from(entry: ActivityWithFeedback) -> Self {
        let ActivityWithFeedback { activity, feedback } = entry;
        Self {
            id: activity.id,
            description: activity.description,
            access_code: activity.access_code,
            start_time: activity.start_time,
            end_time: activity.end_time,
            created_at: activity.created_at,
            feedback: feedback.into_iter().map(FeedbackResponse::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_named() {
        let req: CreateActivityRequest =
            serde_json::from_str(r#"{"description":"Lecture 1","start_time":"2026-01-01T10:00:00Z"}"#)
                .unwrap_or_else(|_| panic!("request should deserialize"));
        let Err(GatewayError::Validation(msg)) = req.into_new_activity() else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "missing field: access_code");
    }

    #[test]
    fn complete_request_converts() {
        let req: CreateActivityRequest = serde_json::from_str(
            r#"{"description":"Lecture 1","access_code":"ABC123",
                "start_time":"2026-01-01T10:00:00Z","end_time":"2026-01-01T11:00:00Z"}"#,
        )
        .unwrap_or_else(|_| panic!("request should deserialize"));
        let Ok(input) = req.into_new_activity() else {
            panic!("conversion should succeed");
        };
        assert_eq!(input.access_code, "ABC123");
        assert!(input.validate().is_ok());
    }
}
