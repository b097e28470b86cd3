//! Broadcast channel for domain events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Publishing is
//! synchronous and never waits on observers. Each observer holds a
//! [`Subscription`] that filters the shared stream down to its
//! [`Topic`], so a slow or vanished observer never affects the publisher
//! or any other observer.

use tokio::sync::broadcast;

use super::{ActivityId, FeedbackEvent};

/// Which events a [`Subscription`] receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Every event, across all activities.
    Global,
    /// Only events that belong to one activity.
    Activity(ActivityId),
}

impl Topic {
    /// Returns `true` if an event for `activity_id` belongs to this topic.
    #[must_use]
    pub fn matches(&self, activity_id: ActivityId) -> bool {
        match self {
            Self::Global => true,
            Self::Activity(id) => *id == activity_id,
        }
    }
}

/// Broadcast bus for [`FeedbackEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity
/// (default 10 000). When the ring buffer is full, the oldest events are
/// dropped for lagging receivers only.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<FeedbackEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all current subscriptions.
    ///
    /// Returns the number of live subscriptions the event was handed to
    /// before topic filtering. Observers that subscribe later never see
    /// it. With no subscriptions the event is dropped and `0` is returned.
    pub fn publish(&self, event: FeedbackEvent) -> usize {
        let activity_id = event.activity_id();
        let event_type = event.event_type_str();
        match self.sender.send(event) {
            Ok(observers) => {
                tracing::debug!(%activity_id, event_type, observers, "event published");
                observers
            }
            Err(_) => {
                tracing::trace!(%activity_id, event_type, "event dropped: no observers");
                0
            }
        }
    }

    /// Registers a new observer for `topic`.
    ///
    /// Each WebSocket connection should call this once on connect.
    #[must_use]
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        Subscription {
            topic,
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Returns the current number of live subscriptions.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Handle for one observer of the [`EventBus`].
///
/// Dropping the handle unsubscribes it.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    receiver: Option<broadcast::Receiver<FeedbackEvent>>,
}

impl Subscription {
    /// Waits for the next event matching this subscription's topic.
    ///
    /// Events missed because this observer lagged are logged and skipped.
    /// Returns `None` once the subscription is closed or the bus is gone.
    pub async fn recv(&mut self) -> Option<FeedbackEvent> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.recv().await {
                Ok(event) if self.topic.matches(event.activity_id()) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, topic = ?self.topic, "observer lagged behind event bus");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Returns the topic this subscription currently follows.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        self.topic
    }

    /// Switches this subscription to another topic. Only events published
    /// afterwards are filtered by the new topic.
    pub fn retarget(&mut self, topic: Topic) {
        self.topic = topic;
    }

    /// Returns `true` until the subscription is closed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    /// Detaches from the bus. Calling it again is a no-op.
    ///
    /// Returns `true` if this call closed the subscription.
    pub fn unsubscribe(&mut self) -> bool {
        self.receiver.take().is_some()
    }
}
