//! Domain layer: core types, time source, and event system.
//!
//! This module contains the server-side domain model including activity
//! and feedback identity, the activity time window, the emoticon policy,
//! and the event bus that fans accepted feedback out to observers.

pub mod activity;
pub mod clock;
pub mod emoticon;
pub mod event_bus;
pub mod feedback;
pub mod feedback_event;
pub mod ids;

pub use activity::{Activity, ActivityWithFeedback, NewActivity, TimeWindow};
pub use clock::{Clock, ManualClock, SystemClock, storage_precision};
pub use emoticon::EmoticonPolicy;
pub use event_bus::{EventBus, Subscription, Topic};
pub use feedback::Feedback;
pub use feedback_event::FeedbackEvent;
pub use ids::{ActivityId, FeedbackId};
