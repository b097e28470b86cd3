//! Feedback: a single timestamped reaction against one activity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ActivityId, FeedbackId};

/// A reaction accepted by the feedback gate. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Unique feedback identifier.
    pub id: FeedbackId,
    /// Owning activity.
    pub activity_id: ActivityId,
    /// Reaction token, e.g. `"😊"`.
    pub emoticon: String,
    /// Instant the gate admitted the submission. Set by the system.
    pub timestamp: DateTime<Utc>,
}

impl Feedback {
    /// Creates a feedback record stamped with `timestamp`.
    #[must_use]
    pub fn new(activity_id: ActivityId, emoticon: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: FeedbackId::new(),
            activity_id,
            emoticon,
            timestamp,
        }
    }
}
