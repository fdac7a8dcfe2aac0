//! Value objects - immutable types shared by every entity

mod permissions;
mod snowflake;

pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeParseError};
