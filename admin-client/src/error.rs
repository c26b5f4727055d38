//! Client error types

use crate::config::ConfigError;
use shared::{DraftError, FormError, Notice};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built as given
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Server rejected the request with an error envelope
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists / stale write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error reported by the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Form rejected before sending
    #[error("Invalid form: {0}")]
    Form(#[from] FormError),

    /// Order draft rule violated
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Toast shown for this error
    pub fn notice(&self) -> Notice {
        match self {
            ClientError::Http(e) if e.is_timeout() => {
                Notice::error("The server took too long to answer")
            }
            ClientError::Http(_) => Notice::error("Could not reach the server"),
            ClientError::Api { message, .. } => Notice::error(message.clone()),
            ClientError::Unauthorized => Notice::error("Your session has expired, sign in again"),
            ClientError::Forbidden(_) => {
                Notice::error("You do not have permission to perform this action")
            }
            ClientError::NotFound(_) => Notice::warning("The record no longer exists"),
            ClientError::Conflict(msg) | ClientError::Validation(msg) => {
                Notice::warning(msg.clone())
            }
            ClientError::Form(e) => Notice::warning(format!("Check the form: {}", e)),
            ClientError::Draft(e) => Notice::warning(e.to_string()),
            ClientError::InvalidResponse(_)
            | ClientError::InvalidRequest(_)
            | ClientError::Serialization(_)
            | ClientError::Internal(_)
            | ClientError::Config(_) => Notice::error("Unexpected error, try again"),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
