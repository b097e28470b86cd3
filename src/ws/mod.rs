//! WebSocket layer: live feedback observers.
//!
//! The endpoint at `/ws` streams `activity_created` and
//! `feedback_received` events. Observers follow every activity by default
//! or a single one via `?activity_id=` or the `watch` command.

pub mod connection;
pub mod handler;
pub mod messages;
