//! Error types for the metadata service

use thiserror::Error;

/// Service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Hub unreachable: {0}")]
    Network(String),

    #[error("Hub request timed out: {0}")]
    Timeout(String),

    #[error("Hub returned status {status} for {url}")]
    HubStatus { status: u16, url: String },

    #[error("Malformed hub response: {0}")]
    MalformedResponse(String),

    #[error("Invalid hub URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn hub_status(status: u16, url: impl Into<String>) -> Self {
        ServiceError::HubStatus {
            status,
            url: url.into(),
        }
    }

    /// Whether the error came from talking to the hub
    pub fn is_hub_failure(&self) -> bool {
        matches!(
            self,
            ServiceError::Network(_)
                | ServiceError::Timeout(_)
                | ServiceError::HubStatus { .. }
                | ServiceError::MalformedResponse(_)
                | ServiceError::InvalidUrl(_)
        )
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout(err.to_string())
        } else if err.is_builder() {
            ServiceError::InvalidUrl(err.to_string())
        } else if err.is_decode() {
            ServiceError::MalformedResponse(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
