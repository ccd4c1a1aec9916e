//! Reaction type - one entry of the emoji catalog

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

pub const MAX_NAME_LEN: usize = 12;

/// Catalog installed on first start, in display order
pub const DEFAULT_REACTION_TYPES: [&str; 7] = ["like", "love", "yay", "haha", "wow", "sad", "angry"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionType {
    pub id: Snowflake,
    pub name: String,
    pub uses_animated_icon: bool,
    pub icon_ref: String,
    pub display_weight: i32,
    pub created_at: DateTime<Utc>,
}

impl ReactionType {
    pub fn new(
        id: Snowflake,
        name: String,
        uses_animated_icon: bool,
        icon_ref: String,
        display_weight: i32,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Ok(Self {
            id,
            name,
            uses_animated_icon,
            icon_ref,
            display_weight,
            created_at: Utc::now(),
        })
    }

    /// Default entries use the animated icon named after the type
    pub fn default_entry(id: Snowflake, name: &str, display_weight: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            uses_animated_icon: true,
            icon_ref: name.to_string(),
            display_weight,
            created_at: Utc::now(),
        }
    }

    /// Names are 1-12 chars of lowercase ascii letters, digits, '_' or '-'
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidReactionTypeName(format!(
                "name must be 1-{MAX_NAME_LEN} characters"
            )));
        }
        if !name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
        {
            return Err(DomainError::InvalidReactionTypeName(
                "name may only contain lowercase letters, digits, '_' and '-'".to_string(),
            ));
        }
        Ok(())
    }
}
