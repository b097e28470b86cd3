//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs keep every field optional so that missing input surfaces
//! as a structured validation error from the core error type.

pub mod activity_dto;
pub mod feedback_dto;

pub use activity_dto::*;
pub use feedback_dto::*;
