//! Database row models for activities and feedback.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Activity, ActivityId, Feedback, FeedbackId};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    /// Primary key.
    pub id: Uuid,
    /// Free-text label.
    pub description: String,
    /// Unique access code.
    pub access_code: String,
    /// Window start.
    pub start_time: Option<DateTime<Utc>>,
    /// Window end.
    pub end_time: Option<DateTime<Utc>>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: ActivityId::from_uuid(row.id),
            description: row.description,
            access_code: row.access_code,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackRow {
    /// Public identifier.
    pub id: Uuid,
    /// Owning activity.
    pub activity_id: Uuid,
    /// Reaction token.
    pub emoticon: String,
    /// Admission instant.
    pub submitted_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Self {
            id: FeedbackId::from_uuid(row.id),
            activity_id: ActivityId::from_uuid(row.activity_id),
            emoticon: row.emoticon,
            timestamp: row.submitted_at,
        }
    }
}
