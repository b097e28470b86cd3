//! Activities: time-boxed feedback sessions identified by an access code.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ActivityId, Feedback, storage_precision};
use crate::error::GatewayError;

/// An instructor-defined, time-bounded session.
///
/// Mirrors the stored record. The time bounds are optional because the
/// record may come from storage that was written outside the registry;
/// use [`Activity::window`] to obtain a validated [`TimeWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// Unique activity identifier (immutable after creation).
    pub id: ActivityId,
    /// Free-text label.
    pub description: String,
    /// Code students use to join. Unique across all activities.
    pub access_code: String,
    /// Start of the feedback window.
    pub start_time: Option<DateTime<Utc>>,
    /// End of the feedback window.
    pub end_time: Option<DateTime<Utc>>,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Returns the activity's feedback window.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::IncompleteActivity`] if either bound is
    /// missing.
    pub fn window(&self) -> Result<TimeWindow, GatewayError> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Ok(TimeWindow { start, end }),
            _ => Err(GatewayError::IncompleteActivity(self.id)),
        }
    }
}

/// Closed interval `[start, end]` during which feedback is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Inclusive upper bound.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Returns `true` if `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Validated-on-create input for a new activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Free-text label; must be non-empty.
    pub description: String,
    /// Access code; must be non-empty. Matched exactly, no normalization.
    pub access_code: String,
    /// Start of the feedback window.
    pub start_time: DateTime<Utc>,
    /// End of the feedback window; must be after `start_time`.
    pub end_time: DateTime<Utc>,
}

impl NewActivity {
    /// Checks field presence and the `end_time > start_time` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] describing the first violated
    /// rule.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.description.trim().is_empty() {
            return Err(GatewayError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if self.access_code.trim().is_empty() {
            return Err(GatewayError::Validation(
                "access_code must not be empty".to_string(),
            ));
        }
        if storage_precision(self.end_time) <= storage_precision(self.start_time) {
            return Err(GatewayError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the stored [`Activity`], assigning a fresh id. All instants
    /// are truncated to storage precision.
    #[must_use]
    pub fn into_activity(self, created_at: DateTime<Utc>) -> Activity {
        Activity {
            id: ActivityId::new(),
            description: self.description,
            access_code: self.access_code,
            start_time: Some(storage_precision(self.start_time)),
            end_time: Some(storage_precision(self.end_time)),
            created_at: storage_precision(created_at),
        }
    }
}

/// One entry of the activity history: the activity and its feedback in
/// creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityWithFeedback {
    /// The activity record.
    pub activity: Activity,
    /// Feedback received so far, oldest first.
    pub feedback: Vec<Feedback>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_activity(start: DateTime<Utc>, end: DateTime<Utc>) -> NewActivity {
        NewActivity {
            description: "Lecture 1".to_string(),
            access_code: "ABC123".to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn window_includes_both_bounds() {
        let start = Utc::now();
        let end = start + Duration::seconds(3600);
        let window = TimeWindow { start, end };
        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(window.contains(start + Duration::seconds(10)));
        assert!(!window.contains(start - Duration::milliseconds(1)));
        assert!(!window.contains(end + Duration::milliseconds(1)));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let now = Utc::now();
        let result = new_activity(now, now).validate();
        let Err(GatewayError::Validation(msg)) = result else {
            panic!("expected validation error");
        };
        assert!(msg.contains("end_time"));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let now = Utc::now();
        let mut input = new_activity(now, now + Duration::hours(1));
        input.description = "   ".to_string();
        assert!(input.validate().is_err());

        let mut input = new_activity(now, now + Duration::hours(1));
        input.access_code = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn into_activity_keeps_fields() {
        let now = Utc::now();
        let activity = new_activity(now, now + Duration::hours(1)).into_activity(now);
        assert_eq!(activity.access_code, "ABC123");
        assert_eq!(activity.start_time, Some(storage_precision(now)));
        assert!(activity.window().is_ok());
    }

    #[test]
    fn into_activity_truncates_to_microseconds() {
        let Some(start) = DateTime::from_timestamp(1_772_445_600, 987_654_321) else {
            panic!("valid timestamp");
        };
        let activity = new_activity(start, start + Duration::hours(1)).into_activity(start);
        for instant in [activity.start_time, activity.end_time, Some(activity.created_at)] {
            let Some(instant) = instant else {
                panic!("bounds should be set");
            };
            assert_eq!(instant.timestamp_subsec_nanos() % 1_000, 0);
        }
    }

    #[test]
    fn sub_microsecond_range_is_rejected() {
        let Some(start) = DateTime::from_timestamp(1_772_445_600, 100) else {
            panic!("valid timestamp");
        };
        let result = new_activity(start, start + Duration::nanoseconds(200)).validate();
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }

    #[test]
    fn missing_bound_is_incomplete() {
        let now = Utc::now();
        let mut activity = new_activity(now, now + Duration::hours(1)).into_activity(now);
        activity.end_time = None;
        let Err(GatewayError::IncompleteActivity(id)) = activity.window() else {
            panic!("expected incomplete activity");
        };
        assert_eq!(id, activity.id);
    }
}
