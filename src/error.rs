//! Error types for SysML v2 client operations

use thiserror::Error;

/// Structured error types for SysML v2 client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure, or a response body that could not be decoded
    /// as JSON when JSON was expected
    #[error("{message}")]
    Transport {
        message: String,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Authentication or authorization was rejected (401/403)
    #[error("Authentication failed: {status} - {body}")]
    Authentication { status: u16, body: String },

    /// Resource not found (404)
    #[error("Resource not found at {endpoint}: {body}")]
    NotFound { endpoint: String, body: String },

    /// Request was malformed (400)
    #[error("Bad request for {endpoint}: {detail}")]
    BadRequest { endpoint: String, detail: String },

    /// Request conflicts with server state (409)
    #[error("Conflict detected for {endpoint}: {body}")]
    Conflict { endpoint: String, body: String },

    /// Any other status code that differs from the expected one
    #[error("Unexpected status code {status} for {method} {endpoint}. Response: {body}")]
    Api {
        status: u16,
        method: String,
        endpoint: String,
        body: String,
    },
}

impl ClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a transport error from a failed request or body read
    pub(crate) fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        Self::Transport {
            message: format!("Network error during request to {url}: {source}"),
            url,
            source: Box::new(source),
        }
    }

    /// Create a transport error for a response body that was not valid JSON
    pub(crate) fn decode(url: impl Into<String>, body: &str, source: serde_json::Error) -> Self {
        let url = url.into();
        Self::Transport {
            message: format!(
                "Failed to decode JSON response from {url}: {source}. Response text: {body}"
            ),
            url,
            source: Box::new(source),
        }
    }

    /// HTTP status associated with API-level errors, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Authentication { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            ClientError::BadRequest { .. } => Some(400),
            ClientError::Conflict { .. } => Some(409),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Config(_) | ClientError::Transport { .. } => None,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
