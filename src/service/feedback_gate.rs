//! Feedback gate: admits submissions that fall inside an activity's
//! time window, stores them, and publishes them to observers.

use std::sync::Arc;

use crate::domain::{
    ActivityId, Clock, EmoticonPolicy, EventBus, Feedback, FeedbackEvent, storage_precision,
};
use crate::error::GatewayError;
use crate::persistence::{Store, StoreError};

/// Validates and records feedback submissions.
///
/// Every submission follows: check emoticon → resolve activity → check
/// time bounds → read the clock once → check window → insert → publish.
/// The single clock reading is both the window check input and the
/// stored timestamp, so no stored feedback can lie outside its window.
#[derive(Debug, Clone)]
pub struct FeedbackGate {
    store: Arc<dyn Store>,
    event_bus: EventBus,
    clock: Arc<dyn Clock>,
    policy: EmoticonPolicy,
}

impl FeedbackGate {
    /// Creates a new `FeedbackGate`.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        event_bus: EventBus,
        clock: Arc<dyn Clock>,
        policy: EmoticonPolicy,
    ) -> Self {
        Self {
            store,
            event_bus,
            clock,
            policy,
        }
    }

    /// Returns the active emoticon policy.
    #[must_use]
    pub fn policy(&self) -> &EmoticonPolicy {
        &self.policy
    }

    /// Submits a reaction for an activity.
    ///
    /// On success the stored feedback is published exactly once on the
    /// event bus. No failure path stores or publishes anything. The
    /// timestamp is the clock reading truncated to storage precision, so
    /// the returned record equals the one later listed.
    ///
    /// The emoticon is checked before the activity is resolved: a
    /// rejected emoticon yields `Validation` even for an unknown id.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if the emoticon is rejected by policy.
    /// - [`GatewayError::ActivityNotFound`] if the activity does not exist.
    /// - [`GatewayError::IncompleteActivity`] if its time bounds are unset.
    /// - [`GatewayError::OutsideWindow`] if now is before start or after end.
    /// - [`GatewayError::Storage`] on persistence failure.
    pub async fn submit(
        &self,
        activity_id: ActivityId,
        emoticon: String,
    ) -> Result<Feedback, GatewayError> {
        self.policy.check(&emoticon)?;

        let activity = self
            .store
            .find_activity_by_id(activity_id)
            .await?
            .ok_or_else(|| GatewayError::ActivityNotFound(activity_id.to_string()))?;

        let window = activity.window()?;

        let now = storage_precision(self.clock.now());
        if !window.contains(now) {
            tracing::debug!(%activity_id, attempted_at = %now, "submission outside activity window");
            return Err(GatewayError::OutsideWindow {
                activity_id,
                start: window.start,
                end: window.end,
                attempted_at: now,
            });
        }

        let feedback = Feedback::new(activity_id, emoticon, now);
        match self.store.insert_feedback(&feedback).await {
            Ok(()) => {}
            Err(StoreError::MissingReference(_)) => {
                return Err(GatewayError::ActivityNotFound(activity_id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        let observers = self.event_bus.publish(FeedbackEvent::FeedbackReceived {
            feedback: feedback.clone(),
        });

        tracing::info!(%activity_id, feedback_id = %feedback.id, observers, "feedback accepted");
        Ok(feedback)
    }

    /// Returns the feedback recorded for an activity, oldest first.
    /// Unknown ids yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    pub async fn list_for_activity(
        &self,
        activity_id: ActivityId,
    ) -> Result<Vec<Feedback>, GatewayError> {
        Ok(self.store.list_feedback_by_activity(activity_id).await?)
    }
}
