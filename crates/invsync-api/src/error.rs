use thiserror::Error;

/// Errors returned by the inventory API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; `message` is the server's
    /// `msg`/`message` body field when present, else the raw status line.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// The message to attach to a failed row: the server-provided message
    /// when one exists, otherwise the transport error text.
    #[must_use]
    pub fn row_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
