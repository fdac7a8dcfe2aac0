//! Model errors - failures turning raw payloads into entities

use thiserror::Error;

/// Model layer errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// A key the entity cannot exist without was absent
    #[error("Payload is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl ModelError {
    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
        }
    }
}
