//! # feedback-gateway
//!
//! REST API and WebSocket gateway for time-boxed classroom feedback.
//!
//! An instructor registers an activity with a description, a unique access
//! code and a time window. Students join by code and send emoticon
//! reactions, which are accepted only while the window is open. Every
//! accepted reaction is persisted and pushed at once to live observers.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ActivityRegistry, FeedbackGate (service/)
//!     ├── EventBus, Clock, EmoticonPolicy (domain/)
//!     │
//!     └── Store (persistence/)
//!           ├── InMemoryStore
//!           └── PostgresStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
