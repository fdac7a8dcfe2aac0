//! Transport errors
//!
//! Raised by the REST transport and handed to callers unchanged. The client
//! performs no retry on any of them.

/// REST transport error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// Connection, TLS, or timeout failure before a response arrived
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success status with the API's JSON error body when present
    #[error("API error {status} (code {code:?}): {message}")]
    Status {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Rate limited, retry after {retry_after:.3}s")]
    RateLimited { retry_after: f64, global: bool },

    /// Response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    /// HTTP status code, when the failure came with a response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
