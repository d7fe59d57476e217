//! Error types for the checkout collaborators and configuration.

use thiserror::Error;

/// Failure talking to the ticket catalog or the checkout endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an error status or an `error` body
    #[error("Backend error: {0}")]
    Backend(String),

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Label used for metrics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Backend(_) => "backend",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Backend(format!("HTTP {status}"))
        } else {
            Self::Network(error.to_string())
        }
    }
}

/// Invalid checkout configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A role table entry is not `id:role`
    #[error("Malformed ticket role entry '{0}', expected 'id:role' or '*:role'")]
    MalformedRoleEntry(String),

    /// A role name other than parent, child or independent
    #[error("Unknown ticket role '{0}'")]
    UnknownRole(String),
}
