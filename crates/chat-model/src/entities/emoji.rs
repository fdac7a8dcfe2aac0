//! Base emoji shared by custom guild emojis and reaction emojis

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Emoji as it appears in reactions and message components
///
/// Unicode emojis carry only a `name`; custom emojis also carry an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialEmoji {
    #[serde(default)]
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl PartialEmoji {
    /// A unicode emoji
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// A custom emoji
    pub fn custom(id: Snowflake, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }

    /// Route segment used by the reaction endpoints (already percent-encoded)
    pub fn identifier(&self) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        match self.id {
            Some(id) => {
                let prefix = if self.animated { "a:" } else { "" };
                format!("{prefix}{name}:{id}")
            }
            None => urlencoding::encode(name).into_owned(),
        }
    }

    /// CDN asset url for custom emojis
    pub fn url(&self, cdn_base: &str) -> Option<String> {
        self.id.map(|id| emoji_url(cdn_base, id, self.animated))
    }
}

/// Build the CDN url of a custom emoji image
pub fn emoji_url(cdn_base: &str, id: Snowflake, animated: bool) -> String {
    let ext = if animated { "gif" } else { "png" };
    format!("{}/emojis/{id}.{ext}", cdn_base.trim_end_matches('/'))
}

// Message markup: `<:name:id>`, `<a:name:id>`, or the raw unicode character
impl fmt::Display for PartialEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or_default();
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{name}:{id}>"),
            Some(id) => write!(f, "<:{name}:{id}>"),
            None => f.write_str(name),
        }
    }
}
