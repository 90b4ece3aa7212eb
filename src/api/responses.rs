//! Common API response types

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::models::ServiceError;

/// Error body returned by failing endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Fixed acknowledgment for fire-and-forget operations
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn registered() -> Self {
        Self { status: "registered" }
    }

    pub fn queued() -> Self {
        Self { status: "queued" }
    }
}

/// HTTP status for a service error
pub fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ServiceError::Network(_)
        | ServiceError::HubStatus { .. }
        | ServiceError::MalformedResponse(_)
        | ServiceError::InvalidUrl(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Config(_)
        | ServiceError::Serialization(_)
        | ServiceError::Io(_)
        | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert ServiceError to HTTP response
impl From<ServiceError> for HttpResponse {
    fn from(error: ServiceError) -> Self {
        HttpResponse::build(status_for(&error)).json(ErrorResponse::new(error.to_string()))
    }
}
