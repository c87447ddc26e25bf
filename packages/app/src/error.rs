// ABOUTME: Application error types

use taskdeck_client::ClientError;
use thiserror::Error;

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The policy denied the action; nothing was sent to the backend
    #[error("Not permitted: {0}")]
    NotPermitted(String),

    /// The form input failed a local check; nothing was sent to the backend
    #[error("{0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl AppError {
    pub fn not_permitted(msg: impl Into<String>) -> Self {
        Self::NotPermitted(msg.into())
    }

    /// Check whether this failure terminated the session
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::Client(e) if e.is_auth_error())
    }
}
