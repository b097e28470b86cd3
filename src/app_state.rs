//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{Clock, EmoticonPolicy, EventBus};
use crate::persistence::Store;
use crate::service::{ActivityRegistry, FeedbackGate};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Activity creation and lookup.
    pub registry: Arc<ActivityRegistry>,
    /// Feedback admission.
    pub feedback_gate: Arc<FeedbackGate>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Name of the active storage backend.
    pub store_backend: &'static str,
}

impl AppState {
    /// Wires the services over one store, bus and clock.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        event_bus: EventBus,
        clock: Arc<dyn Clock>,
        policy: EmoticonPolicy,
    ) -> Self {
        let store_backend = store.backend();
        let registry = ActivityRegistry::new(Arc::clone(&store), event_bus.clone(), Arc::clone(&clock));
        let feedback_gate = FeedbackGate::new(store, event_bus.clone(), clock, policy);
        Self {
            registry: Arc::new(registry),
            feedback_gate: Arc::new(feedback_gate),
            event_bus,
            store_backend,
        }
    }
}
