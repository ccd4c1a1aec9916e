//! Value objects - immutable types that represent domain concepts

mod snowflake;
mod target_ref;
mod viewer;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use target_ref::{TargetRef, MAX_TARGET_ID_LEN, MAX_TARGET_TYPE_LEN};
pub use viewer::{SessionToken, ViewerKey, ViewerKeyParseError};
