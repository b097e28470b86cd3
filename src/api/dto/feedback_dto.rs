//! Feedback DTOs for submission and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ActivityId, Feedback, FeedbackId};
use crate::error::GatewayError;

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    /// Target activity UUID.
    #[serde(default)]
    pub activity_id: Option<String>,
    /// Reaction token, e.g. `"😊"`.
    #[serde(default)]
    pub emoticon: Option<String>,
}

impl SubmitFeedbackRequest {
    /// Checks presence of both fields and parses the activity id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if a field is missing or the
    /// id is not a UUID.
    pub fn into_parts(self) -> Result<(ActivityId, String), GatewayError> {
        let raw_id = self
            .activity_id
            .ok_or_else(|| GatewayError::Validation("missing field: activity_id".to_string()))?;
        let activity_id = raw_id
            .parse::<ActivityId>()
            .map_err(|_| GatewayError::Validation(format!("invalid activity_id: {raw_id}")))?;
        let emoticon = self
            .emoticon
            .ok_or_else(|| GatewayError::Validation("missing field: emoticon".to_string()))?;
        Ok((activity_id, emoticon))
    }
}

/// A stored feedback record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackResponse {
    /// Feedback identifier.
    pub id: FeedbackId,
    /// Owning activity.
    pub activity_id: ActivityId,
    /// Reaction token.
    pub emoticon: String,
    /// Admission instant.
    pub timestamp: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            activity_id: feedback.activity_id,
            emoticon: feedback.emoticon,
            timestamp: feedback.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_a_validation_error() {
        let req = SubmitFeedbackRequest {
            activity_id: Some("not-a-uuid".to_string()),
            emoticon: Some("😊".to_string()),
        };
        assert!(matches!(req.into_parts(), Err(GatewayError::Validation(_))));
    }

    #[test]
    fn missing_emoticon_is_a_validation_error() {
        let req = SubmitFeedbackRequest {
            activity_id: Some(ActivityId::new().to_string()),
            emoticon: None,
        };
        assert!(matches!(req.into_parts(), Err(GatewayError::Validation(_))));
    }
}
