//! Error types for the team API.

/// Result type alias using [`TeamError`].
pub type Result<T> = std::result::Result<T, TeamError>;

/// Errors that can occur when talking to the team endpoints.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    /// Network/HTTP transport errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status returned by the server.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The payload could not be decoded into member records.
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The requested member does not exist.
    #[error("Team member {0} not found")]
    NotFound(String),
}

impl TeamError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        TeamError::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if the server rejected the request (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, TeamError::Api { status, .. } if (400..500).contains(status))
    }
}
