//! In-process store backed by `tokio::sync::RwLock`.
//!
//! All tables live behind a single lock, so every write (including the
//! access-code uniqueness check and the insert it guards) is atomic and
//! every read sees a consistent snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ACCESS_CODE_CONSTRAINT, Store, StoreError};
use crate::domain::{Activity, ActivityId, ActivityWithFeedback, Feedback};

#[derive(Debug, Default)]
struct Tables {
    activities: HashMap<ActivityId, Activity>,
    /// Activity ids in insertion order.
    order: Vec<ActivityId>,
    by_code: HashMap<String, ActivityId>,
    feedback: HashMap<ActivityId, Vec<Feedback>>,
}

/// Volatile [`Store`] for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.by_code.contains_key(&activity.access_code) {
            return Err(StoreError::UniqueViolation {
                constraint: ACCESS_CODE_CONSTRAINT.to_string(),
            });
        }
        if tables.activities.contains_key(&activity.id) {
            return Err(StoreError::UniqueViolation {
                constraint: "activities_pkey".to_string(),
            });
        }
        tables
            .by_code
            .insert(activity.access_code.clone(), activity.id);
        tables.order.push(activity.id);
        tables.activities.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn find_activity_by_code(&self, code: &str) -> Result<Option<Activity>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_code
            .get(code)
            .and_then(|id| tables.activities.get(id))
            .cloned())
    }

    async fn find_activity_by_id(&self, id: ActivityId) -> Result<Option<Activity>, StoreError> {
        Ok(self.tables.read().await.activities.get(&id).cloned())
    }

    async fn list_activities_with_feedback(&self) -> Result<Vec<ActivityWithFeedback>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .order
            .iter()
            .filter_map(|id| tables.activities.get(id))
            .map(|activity| ActivityWithFeedback {
                activity: activity.clone(),
                feedback: tables
                    .feedback
                    .get(&activity.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.activities.contains_key(&feedback.activity_id) {
            return Err(StoreError::MissingReference(format!(
                "activity {}",
                feedback.activity_id
            )));
        }
        tables
            .feedback
            .entry(feedback.activity_id)
            .or_default()
            .push(feedback.clone());
        Ok(())
    }

    async fn list_feedback_by_activity(&self, id: ActivityId) -> Result<Vec<Feedback>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.feedback.get(&id).cloned().unwrap_or_default())
    }

    async fn delete_activity(&self, id: ActivityId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(activity) = tables.activities.remove(&id) else {
            return Ok(false);
        };
        tables.by_code.remove(&activity.access_code);
        tables.order.retain(|other| *other != id);
        tables.feedback.remove(&id);
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::NewActivity;

    fn make_activity(code: &str) -> Activity {
        let now = Utc::now();
        NewActivity {
            description: "Lecture".to_string(),
            access_code: code.to_string(),
            start_time: now,
            end_time: now + Duration::hours(1),
        }
        .into_activity(now)
    }

    #[tokio::test]
    async fn insert_and_find_by_code_and_id() {
        let store = InMemoryStore::new();
        let activity = make_activity("ABC123");
        assert!(store.insert_activity(&activity).await.is_ok());

        let Ok(Some(by_code)) = store.find_activity_by_code("ABC123").await else {
            panic!("activity should be found by code");
        };
        assert_eq!(by_code, activity);

        let Ok(Some(by_id)) = store.find_activity_by_id(activity.id).await else {
            panic!("activity should be found by id");
        };
        assert_eq!(by_id.access_code, "ABC123");
    }

    #[tokio::test]
    async fn code_lookup_is_exact() {
        let store = InMemoryStore::new();
        let _ = store.insert_activity(&make_activity("ABC123")).await;
        let Ok(found) = store.find_activity_by_code("abc123").await else {
            panic!("lookup failed");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let store = InMemoryStore::new();
        let _ = store.insert_activity(&make_activity("ABC123")).await;
        let Err(err) = store.insert_activity(&make_activity("ABC123")).await else {
            panic!("duplicate code must be rejected");
        };
        assert!(err.is_duplicate_access_code());
    }

    #[tokio::test]
    async fn concurrent_inserts_with_same_code_admit_one() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.insert_activity(&make_activity("RACE")).await
            }));
        }

        let mut ok = 0;
        let mut dup = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => ok += 1,
                Ok(Err(err)) if err.is_duplicate_access_code() => dup += 1,
                _ => panic!("unexpected outcome"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(dup, 15);
    }

    #[tokio::test]
    async fn feedback_requires_existing_activity() {
        let store = InMemoryStore::new();
        let feedback = Feedback::new(ActivityId::new(), "😊".to_string(), Utc::now());
        let result = store.insert_feedback(&feedback).await;
        assert!(matches!(result, Err(StoreError::MissingReference(_))));
    }

    #[tokio::test]
    async fn feedback_is_listed_in_creation_order() {
        let store = InMemoryStore::new();
        let activity = make_activity("ORDER");
        let _ = store.insert_activity(&activity).await;

        let now = Utc::now();
        for (i, e) in ["😊", "😢", "😮"].iter().enumerate() {
            let fb = Feedback::new(activity.id, (*e).to_string(), now + Duration::seconds(i as i64));
            assert!(store.insert_feedback(&fb).await.is_ok());
        }

        let Ok(listed) = store.list_feedback_by_activity(activity.id).await else {
            panic!("list failed");
        };
        let emoticons: Vec<&str> = listed.iter().map(|f| f.emoticon.as_str()).collect();
        assert_eq!(emoticons, vec!["😊", "😢", "😮"]);

        let Ok(again) = store.list_feedback_by_activity(activity.id).await else {
            panic!("list failed");
        };
        assert_eq!(listed, again);
    }

    #[tokio::test]
    async fn list_attaches_feedback_per_activity() {
        let store = InMemoryStore::new();
        let first = make_activity("ONE");
        let second = make_activity("TWO");
        let _ = store.insert_activity(&first).await;
        let _ = store.insert_activity(&second).await;
        let _ = store
            .insert_feedback(&Feedback::new(second.id, "😕".to_string(), Utc::now()))
            .await;

        let Ok(history) = store.list_activities_with_feedback().await else {
            panic!("list failed");
        };
        assert_eq!(history.len(), 2);
        let Some(entry) = history.iter().find(|h| h.activity.id == second.id) else {
            panic!("second activity missing");
        };
        assert_eq!(entry.feedback.len(), 1);
        let Some(entry) = history.iter().find(|h| h.activity.id == first.id) else {
            panic!("first activity missing");
        };
        assert!(entry.feedback.is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_to_feedback_and_frees_code() {
        let store = InMemoryStore::new();
        let activity = make_activity("GONE");
        let _ = store.insert_activity(&activity).await;
        let _ = store
            .insert_feedback(&Feedback::new(activity.id, "😊".to_string(), Utc::now()))
            .await;

        assert!(matches!(store.delete_activity(activity.id).await, Ok(true)));
        assert!(matches!(store.delete_activity(activity.id).await, Ok(false)));

        let Ok(feedback) = store.list_feedback_by_activity(activity.id).await else {
            panic!("list failed");
        };
        assert!(feedback.is_empty());
        assert!(matches!(store.find_activity_by_code("GONE").await, Ok(None)));
        assert!(store.insert_activity(&make_activity("GONE")).await.is_ok());
    }
}
