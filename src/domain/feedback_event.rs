//! Domain events broadcast to live observers.
//!
//! Every accepted submission emits exactly one
//! [`FeedbackEvent::FeedbackReceived`] through the [`super::EventBus`].
//! Activity creation emits [`FeedbackEvent::ActivityCreated`] so history
//! views can refresh without polling.

use serde::Serialize;

use super::{Activity, ActivityId, Feedback};

/// Event pushed to observers after a state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum FeedbackEvent {
    /// A new activity was registered.
    ActivityCreated {
        /// The created activity.
        activity: Activity,
    },

    /// A feedback submission passed the gate and was stored.
    FeedbackReceived {
        /// The stored feedback record.
        feedback: Feedback,
    },
}

impl FeedbackEvent {
    /// Returns the activity this event belongs to.
    #[must_use]
    pub fn activity_id(&self) -> ActivityId {
        match self {
            Self::ActivityCreated { activity } => activity.id,
            Self::FeedbackReceived { feedback } => feedback.activity_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ActivityCreated { .. } => "activity_created",
            Self::FeedbackReceived { .. } => "feedback_received",
        }
    }
}
