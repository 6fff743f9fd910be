//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("authentication required")]
    AuthRequired,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("session is locked")]
    SessionLocked,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] lockbox_crypto::CryptoError),
}

impl ClientError {
    /// Human-readable message for a dismissable, field- or form-scoped
    /// UI notice. Never exposes internals.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Network error. Please check your connection.".to_string(),
            ClientError::AuthRequired | ClientError::SessionLocked => {
                "Your session has expired. Please log in again.".to_string()
            }
            ClientError::AuthFailed(msg)
            | ClientError::Validation(msg)
            | ClientError::Api(msg) => msg.clone(),
            ClientError::NotFound(what) => format!("{what} was not found."),
            ClientError::Crypto(_) => "This entry could not be decrypted.".to_string(),
            ClientError::Serialization(_) => "Unexpected server response.".to_string(),
        }
    }
}
