//! Activity registry: creation, code resolution, and history listing.

use std::sync::Arc;

use crate::domain::{
    Activity, ActivityWithFeedback, Clock, EventBus, FeedbackEvent, NewActivity,
};
use crate::error::GatewayError;
use crate::persistence::Store;

/// Creates activities and resolves access codes.
///
/// Access-code uniqueness is pre-checked before insert. The store's
/// constraint still decides, so a concurrent creation that slips past the
/// pre-check fails with [`GatewayError::DuplicateAccessCode`].
#[derive(Debug, Clone)]
pub struct ActivityRegistry {
    store: Arc<dyn Store>,
    event_bus: EventBus,
    clock: Arc<dyn Clock>,
}

impl ActivityRegistry {
    /// Creates a new `ActivityRegistry`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, event_bus: EventBus, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            event_bus,
            clock,
        }
    }

    /// Validates and persists a new activity, then announces it on the
    /// event bus.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for malformed input,
    /// [`GatewayError::DuplicateAccessCode`] if the code is taken, or
    /// [`GatewayError::Storage`] on persistence failure.
    pub async fn create_activity(&self, input: NewActivity) -> Result<Activity, GatewayError> {
        input.validate()?;

        if self
            .store
            .find_activity_by_code(&input.access_code)
            .await?
            .is_some()
        {
            tracing::debug!(access_code = %input.access_code, "access code already in use");
            return Err(GatewayError::DuplicateAccessCode(input.access_code));
        }

        let activity = input.into_activity(self.clock.now());
        if let Err(err) = self.store.insert_activity(&activity).await {
            if err.is_duplicate_access_code() {
                tracing::debug!(
                    access_code = %activity.access_code,
                    "access code claimed by a concurrent creation"
                );
                return Err(GatewayError::DuplicateAccessCode(activity.access_code));
            }
            return Err(err.into());
        }

        let observers = self.event_bus.publish(FeedbackEvent::ActivityCreated {
            activity: activity.clone(),
        });

        tracing::info!(
            activity_id = %activity.id,
            access_code = %activity.access_code,
            observers,
            "activity created"
        );
        Ok(activity)
    }

    /// Resolves an access code to its activity. Matching is exact.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ActivityNotFound`] if no activity uses the
    /// code.
    pub async fn find_by_access_code(&self, code: &str) -> Result<Activity, GatewayError> {
        self.store
            .find_activity_by_code(code)
            .await?
            .ok_or_else(|| GatewayError::ActivityNotFound(code.to_string()))
    }

    /// Returns every activity with its feedback attached.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on persistence failure.
    pub async fn list_all(&self) -> Result<Vec<ActivityWithFeedback>, GatewayError> {
        Ok(self.store.list_activities_with_feedback().await?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::domain::{ManualClock, Topic, storage_precision};
    use crate::persistence::InMemoryStore;

    fn make_registry() -> (ActivityRegistry, EventBus, DateTime<Utc>) {
        let t = storage_precision(Utc::now());
        let bus = EventBus::new(100);
        let registry = ActivityRegistry::new(
            Arc::new(InMemoryStore::new()),
            bus.clone(),
            Arc::new(ManualClock::new(t)),
        );
        (registry, bus, t)
    }

    fn lecture(code: &str, t: DateTime<Utc>) -> NewActivity {
        NewActivity {
            description: "Lecture 1".to_string(),
            access_code: code.to_string(),
            start_time: t,
            end_time: t + Duration::seconds(3600),
        }
    }

    #[tokio::test]
    async fn create_then_duplicate_code_fails() {
        let (registry, _, t) = make_registry();

        let Ok(activity) = registry.create_activity(lecture("ABC123", t)).await else {
            panic!("first creation should succeed");
        };
        assert_eq!(activity.access_code, "ABC123");
        assert_eq!(activity.created_at, t);

        let result = registry.create_activity(lecture("ABC123", t)).await;
        let Err(GatewayError::DuplicateAccessCode(code)) = result else {
            panic!("expected duplicate access code error");
        };
        assert_eq!(code, "ABC123");
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let (registry, _, t) = make_registry();
        let mut handles = Vec::new();
        for _ in 0..12 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.create_activity(lecture("SAME", t)).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(_)) => created += 1,
                Ok(Err(GatewayError::DuplicateAccessCode(_))) => {}
                _ => panic!("unexpected outcome"),
            }
        }
        assert_eq!(created, 1);

        let Ok(all) = registry.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn invalid_input_is_not_stored() {
        let (registry, _, t) = make_registry();
        let mut input = lecture("BAD", t);
        input.end_time = t;

        let result = registry.create_activity(input).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
        assert!(matches!(
            registry.find_by_access_code("BAD").await,
            Err(GatewayError::ActivityNotFound(_))
        ));
    }

    #[tokio::test]
    async fn find_by_access_code_is_exact() {
        let (registry, _, t) = make_registry();
        let _ = registry.create_activity(lecture("ABC123", t)).await;

        assert!(registry.find_by_access_code("ABC123").await.is_ok());
        assert!(matches!(
            registry.find_by_access_code("abc123").await,
            Err(GatewayError::ActivityNotFound(_))
        ));
        assert!(registry.find_by_access_code(" ABC123").await.is_err());
    }

    #[tokio::test]
    async fn creation_is_announced() {
        let (registry, bus, t) = make_registry();
        let mut sub = bus.subscribe(Topic::Global);

        let Ok(activity) = registry.create_activity(lecture("NEWS", t)).await else {
            panic!("creation failed");
        };
        let Some(event) = sub.recv().await else {
            panic!("expected activity_created event");
        };
        assert_eq!(event.event_type_str(), "activity_created");
        assert_eq!(event.activity_id(), activity.id);
    }
}
