//! PostgreSQL implementation of the [`Store`] contract.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) so the crate builds without a live database. The schema lives
//! in `migrations/` and is embedded with [`sqlx::migrate!`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::{ActivityRow, FeedbackRow};
use super::{Store, StoreError};
use crate::config::GatewayConfig;
use crate::domain::{Activity, ActivityId, ActivityWithFeedback, Feedback};

const ACTIVITY_COLUMNS: &str = "id, description, access_code, start_time, end_time, created_at";
const FEEDBACK_COLUMNS: &str = "id, activity_id, emoticon, submitted_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by the gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL is invalid or the
    /// database is unreachable.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "connected to PostgreSQL"
        );
        Ok(Self::new(pool))
    }

    /// Runs all pending migrations from the `migrations/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("database migrations completed");
        Ok(())
    }
}

/// Translates constraint violations into their [`StoreError`] variants.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::UniqueViolation {
                constraint: db.constraint().unwrap_or_default().to_string(),
            };
        }
        if db.is_foreign_key_violation() {
            return StoreError::MissingReference(db.message().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO activities (id, description, access_code, start_time, end_time, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(activity.id.as_uuid())
        .bind(&activity.description)
        .bind(&activity.access_code)
        .bind(activity.start_time)
        .bind(activity.end_time)
        .bind(activity.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    async fn find_activity_by_code(&self, code: &str) -> Result<Option<Activity>, StoreError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE access_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Activity::from))
    }

    async fn find_activity_by_id(&self, id: ActivityId) -> Result<Option<Activity>, StoreError> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Activity::from))
    }

    async fn list_activities_with_feedback(&self) -> Result<Vec<ActivityWithFeedback>, StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let activities = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY created_at, id"
        ))
        .fetch_all(&mut *tx)
        .await?;
        let feedback = sqlx::query_as::<_, FeedbackRow>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY seq"
        ))
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut grouped: HashMap<Uuid, Vec<Feedback>> = HashMap::new();
        for row in feedback {
            grouped.entry(row.activity_id).or_default().push(row.into());
        }

        Ok(activities
            .into_iter()
            .map(|row| {
                let feedback = grouped.remove(&row.id).unwrap_or_default();
                ActivityWithFeedback {
                    activity: row.into(),
                    feedback,
                }
            })
            .collect())
    }

    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO feedback (id, activity_id, emoticon, submitted_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.activity_id.as_uuid())
        .bind(&feedback.emoticon)
        .bind(feedback.timestamp)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    async fn list_feedback_by_activity(&self, id: ActivityId) -> Result<Vec<Feedback>, StoreError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE activity_id = $1 ORDER BY seq"
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Feedback::from).collect())
    }

    async fn delete_activity(&self, id: ActivityId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
