// ABOUTME: Client error types

use thiserror::Error;

/// Result type for gateway operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Gateway-specific error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// 401 from any endpoint; the session has already been cleared
    #[error("Unauthorized")]
    Unauthorized,

    /// 403 from an endpoint that tolerates role-based denial
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-success response, carrying the response body text
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Failure to persist the session after a successful login
    #[error("Session error: {0}")]
    Session(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this is an authorization failure that terminated the session
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Check if this is a role-based denial that left the session intact
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ClientError::Forbidden(_))
    }

    /// Check if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
