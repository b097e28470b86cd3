//! Persistence layer: durable storage for activities and feedback.
//!
//! [`Store`] is the contract the core depends on. Two backends implement
//! it: [`memory::InMemoryStore`] for tests and single-process deployments,
//! and [`postgres::PostgresStore`] backed by `sqlx::PgPool`. Both enforce
//! access-code uniqueness atomically, which is the authoritative guard
//! against concurrent creations with the same code.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::{Activity, ActivityId, ActivityWithFeedback, Feedback};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Name of the uniqueness constraint on `activities.access_code`.
pub const ACCESS_CODE_CONSTRAINT: &str = "activities_access_code_key";

/// Errors raised by a [`Store`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },

    /// The write referenced a row that does not exist.
    #[error("missing referenced row: {0}")]
    MissingReference(String),

    /// A `PostgreSQL` operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Returns `true` if this is a violation of the access-code constraint.
    #[must_use]
    pub fn is_duplicate_access_code(&self) -> bool {
        matches!(self, Self::UniqueViolation { constraint } if constraint == ACCESS_CODE_CONSTRAINT)
    }
}

/// Durable storage for activities and their feedback.
///
/// Implementations must give read-your-writes consistency within one
/// process and make every single-record insert atomic.
#[async_trait]
pub trait Store: Debug + Send + Sync {
    /// Short backend name for diagnostics (e.g. `"postgres"`).
    fn backend(&self) -> &'static str;

    /// Inserts a new activity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] with
    /// [`ACCESS_CODE_CONSTRAINT`] if the access code is taken.
    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError>;

    /// Looks up an activity by exact access code.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn find_activity_by_code(&self, code: &str) -> Result<Option<Activity>, StoreError>;

    /// Looks up an activity by id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn find_activity_by_id(&self, id: ActivityId) -> Result<Option<Activity>, StoreError>;

    /// Returns every activity with its feedback attached, from one
    /// consistent snapshot. Feedback is in creation order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn list_activities_with_feedback(&self) -> Result<Vec<ActivityWithFeedback>, StoreError>;

    /// Inserts a feedback record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingReference`] if the owning activity no
    /// longer exists.
    async fn insert_feedback(&self, feedback: &Feedback) -> Result<(), StoreError>;

    /// Returns the feedback for one activity in creation order. Unknown
    /// ids yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn list_feedback_by_activity(&self, id: ActivityId) -> Result<Vec<Feedback>, StoreError>;

    /// Deletes an activity and, by cascade, all of its feedback.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn delete_activity(&self, id: ActivityId) -> Result<bool, StoreError>;
}
