//! Value objects - identifiers, permissions, and board ordering

mod permissions;
mod position;
mod slug;
mod snowflake;

pub use permissions::Permissions;
pub use position::{
    is_valid_position, next_position, position_for_index, POSITION_MAX, POSITION_STEP,
};
pub use slug::{slugify, validate_slug, with_random_suffix, SlugError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
