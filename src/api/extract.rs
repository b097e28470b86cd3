//! Request extractors whose rejections use the gateway error shape.

use axum::extract::FromRequest;

use crate::error::GatewayError;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`], but a body that is not JSON or does not
/// match the target type is rejected as [`GatewayError::Validation`]
/// (400 with the structured error body).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);
