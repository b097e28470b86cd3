//! Service layer: business rules over the store and the event bus.
//!
//! [`ActivityRegistry`] owns activity creation and lookup;
//! [`FeedbackGate`] owns submission admission. Both publish through the
//! shared [`super::domain::EventBus`].

pub mod activity_registry;
pub mod feedback_gate;

pub use activity_registry::ActivityRegistry;
pub use feedback_gate::FeedbackGate;
