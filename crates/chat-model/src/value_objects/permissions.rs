//! Permission bitflags as sent by the platform
//!
//! Only the bits the client inspects are named; unknown bits received from the
//! API are preserved.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Guild permission flags
    ///
    /// Serialized as a decimal string in JSON.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE    = 1 << 0;
        const KICK_MEMBERS             = 1 << 1;
        const BAN_MEMBERS              = 1 << 2;
        /// Bypass all permission checks
        const ADMINISTRATOR            = 1 << 3;
        const MANAGE_CHANNELS          = 1 << 4;
        const MANAGE_GUILD             = 1 << 5;
        const ADD_REACTIONS            = 1 << 6;
        const VIEW_AUDIT_LOG           = 1 << 7;
        const VIEW_CHANNEL             = 1 << 10;
        const SEND_MESSAGES            = 1 << 11;
        const MANAGE_MESSAGES          = 1 << 13;
        const ATTACH_FILES             = 1 << 15;
        const USE_EXTERNAL_EMOJIS      = 1 << 18;
        const MANAGE_ROLES             = 1 << 28;
        const MANAGE_WEBHOOKS          = 1 << 29;
        /// Edit and delete emojis, stickers and soundboard sounds
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        /// Create emojis, stickers and soundboard sounds
        const CREATE_GUILD_EXPRESSIONS = 1 << 43;

        /// Every bit, including ones this crate does not name
        const ALL = u64::MAX;
    }
}

const NAMED: &[(&str, Permissions)] = &[
    ("CREATE_INSTANT_INVITE", Permissions::CREATE_INSTANT_INVITE),
    ("KICK_MEMBERS", Permissions::KICK_MEMBERS),
    ("BAN_MEMBERS", Permissions::BAN_MEMBERS),
    ("ADMINISTRATOR", Permissions::ADMINISTRATOR),
    ("MANAGE_CHANNELS", Permissions::MANAGE_CHANNELS),
    ("MANAGE_GUILD", Permissions::MANAGE_GUILD),
    ("ADD_REACTIONS", Permissions::ADD_REACTIONS),
    ("VIEW_AUDIT_LOG", Permissions::VIEW_AUDIT_LOG),
    ("VIEW_CHANNEL", Permissions::VIEW_CHANNEL),
    ("SEND_MESSAGES", Permissions::SEND_MESSAGES),
    ("MANAGE_MESSAGES", Permissions::MANAGE_MESSAGES),
    ("ATTACH_FILES", Permissions::ATTACH_FILES),
    ("USE_EXTERNAL_EMOJIS", Permissions::USE_EXTERNAL_EMOJIS),
    ("MANAGE_ROLES", Permissions::MANAGE_ROLES),
    ("MANAGE_WEBHOOKS", Permissions::MANAGE_WEBHOOKS),
    ("MANAGE_GUILD_EXPRESSIONS", Permissions::MANAGE_GUILD_EXPRESSIONS),
    ("CREATE_GUILD_EXPRESSIONS", Permissions::CREATE_GUILD_EXPRESSIONS),
];

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Check if the permission set has any of the given permissions
    #[inline]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.intersects(permissions)
    }

    /// Union of the permissions of several roles
    pub fn combine<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        roles.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Parse from the decimal string representation used on the wire
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse::<u64>().map(Permissions::from_bits_retain)
    }

    /// Names of the individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.list();
        if names.is_empty() {
            write!(f, "{}", self.bits())
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(Permissions::from_bits_retain)
                    .map_err(|_| de::Error::custom("negative permission bits"))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_retain(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Permissions::parse(value)
                    .map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<u64> for Permissions {
    fn from(bits: u64) -> Self {
        Permissions::from_bits_retain(bits)
    }
}

impl From<Permissions> for u64 {
    fn from(perms: Permissions) -> Self {
        perms.bits()
    }
}
