//! Request bodies for the emoji endpoints
//!
//! All bodies implement `Serialize` and `Validate`; managers validate before
//! sending so malformed input never costs a round trip.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chat_model::Snowflake;
use serde::Serialize;
use validator::{Validate, ValidationError};

/// Largest image the API accepts for an emoji
pub const MAX_EMOJI_IMAGE_BYTES: usize = 256 * 1024;

/// Create guild emoji request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct CreateEmoji {
    #[validate(
        length(min = 2, max = 32, message = "Emoji name must be 2-32 characters"),
        custom(function = "validate_emoji_name")
    )]
    pub name: String,

    /// `data:` URI holding the image
    #[validate(custom(function = "validate_image_data"))]
    pub image: String,

    /// Roles allowed to use the emoji; empty means everyone
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Snowflake>,
}

impl CreateEmoji {
    /// Build a request from raw image bytes
    pub fn new(name: impl Into<String>, content_type: &str, image: &[u8]) -> Self {
        Self {
            name: name.into(),
            image: format!("data:{content_type};base64,{}", STANDARD.encode(image)),
            roles: Vec::new(),
        }
    }

    /// Restrict the emoji to the given roles
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Snowflake>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }
}

/// Modify guild emoji request
///
/// Absent fields are left unchanged by the API; `roles: Some(vec![])` clears
/// the restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct EditEmoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 2, max = 32, message = "Emoji name must be 2-32 characters"),
        custom(function = "validate_emoji_name")
    )]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Snowflake>>,
}

impl EditEmoji {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            roles: None,
        }
    }

    pub fn roles(roles: impl IntoIterator<Item = Snowflake>) -> Self {
        Self {
            name: None,
            roles: Some(roles.into_iter().collect()),
        }
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_emoji_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(invalid(
            "emoji_name",
            "Emoji names may only contain letters, digits and underscores",
        ))
    }
}

fn validate_image_data(image: &str) -> Result<(), ValidationError> {
    let Some(encoded) = image
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, data)| data)
    else {
        return Err(invalid("image_data", "Image must be a base64 data URI"));
    };

    // Four base64 characters carry three bytes
    if encoded.len() / 4 * 3 > MAX_EMOJI_IMAGE_BYTES {
        return Err(invalid("image_size", "Emoji images are limited to 256 KiB"));
    }

    Ok(())
}
