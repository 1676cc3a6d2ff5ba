//! Governance API client error types.

use crate::types::ErrorBody;

/// Errors from governance API calls.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceApiError {
    /// HTTP transport error (connection refused, timeout, ...).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service answered with a non-2xx status.
    #[error("governance API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl GovernanceApiError {
    /// The HTTP status, for [`GovernanceApiError::Api`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `{ "error": { "code", "message" } }` body, when the service sent
    /// one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            Self::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// A short message suitable for end users: the service's own message
    /// when it sent one, the error's display form otherwise.
    pub fn user_message(&self) -> String {
        self.error_body()
            .map(|b| b.error.message)
            .unwrap_or_else(|| self.to_string())
    }
}
