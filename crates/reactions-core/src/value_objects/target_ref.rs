//! Target reference - the (content type, content id) pair a reaction points at

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

pub const MAX_TARGET_TYPE_LEN: usize = 50;
pub const MAX_TARGET_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetRef {
    pub target_type: String,
    pub target_id: String,
}

impl TargetRef {
    /// Build a validated reference
    pub fn new(
        target_type: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let target_type = target_type.into();
        let target_id = target_id.into();

        if target_type.is_empty() || target_type.len() > MAX_TARGET_TYPE_LEN {
            return Err(DomainError::InvalidTarget(format!(
                "target type must be 1-{MAX_TARGET_TYPE_LEN} characters"
            )));
        }
        if !target_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        {
            return Err(DomainError::InvalidTarget(
                "target type may only contain lowercase letters, digits and '_'".to_string(),
            ));
        }
        if target_id.is_empty() || target_id.len() > MAX_TARGET_ID_LEN {
            return Err(DomainError::InvalidTarget(format!(
                "target id must be 1-{MAX_TARGET_ID_LEN} characters"
            )));
        }

        Ok(Self {
            target_type,
            target_id,
        })
    }

    /// Rebuild from storage, skipping validation
    pub fn from_stored(target_type: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            target_id: target_id.into(),
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target_type, self.target_id)
    }
}
