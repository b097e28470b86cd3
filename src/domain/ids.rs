//! Type-safe identifiers for activities and feedback.
//!
//! [`ActivityId`] and [`FeedbackId`] are newtype wrappers around
//! [`uuid::Uuid`] (v4) so that the two kinds of identifier cannot be
//! swapped by accident at call sites or in storage queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an [`super::Activity`].
///
/// Assigned once by the registry at creation time and immutable
/// thereafter. Used as the storage key, the event topic discriminator,
/// and the WebSocket watch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ActivityId(uuid::Uuid);

impl ActivityId {
    /// Creates a new random `ActivityId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `ActivityId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActivityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<uuid::Uuid>().map(Self)
    }
}

impl From<uuid::Uuid> for ActivityId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ActivityId> for uuid::Uuid {
    fn from(id: ActivityId) -> Self {
        id.0
    }
}

/// Unique identifier for a single [`super::Feedback`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FeedbackId(uuid::Uuid);

impl FeedbackId {
    /// Creates a new random `FeedbackId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `FeedbackId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for FeedbackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(ActivityId::new(), ActivityId::new());
        assert_ne!(FeedbackId::new(), FeedbackId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = ActivityId::new().to_string();
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn parses_from_uuid_string() {
        let uuid = uuid::Uuid::new_v4();
        let Ok(id) = uuid.to_string().parse::<ActivityId>() else {
            panic!("valid uuid should parse");
        };
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn rejects_malformed_string() {
        assert!("ABC123".parse::<ActivityId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let id = FeedbackId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
