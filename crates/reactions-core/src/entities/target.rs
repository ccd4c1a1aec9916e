//! Target entity - a content item viewers can react to

use chrono::{DateTime, Utc};

use crate::value_objects::TargetRef;

/// Registered content item. The host mirrors its content here so reactions
/// never point at something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub target: TargetRef,
    /// Content subtype, e.g. the node bundle ("article", "page")
    pub bundle: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Target {
    pub fn new(target: TargetRef, bundle: Option<String>, title: String) -> Self {
        Self {
            target,
            bundle,
            title,
            created_at: Utc::now(),
        }
    }

    /// Check against allow-list entries of the form `type` or `type:bundle`.
    /// An empty list allows every target.
    pub fn is_allowed_by(&self, allowed: &[String]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        allowed.iter().any(|entry| match entry.split_once(':') {
            Some((target_type, bundle)) => {
                target_type == self.target.target_type
                    && self.bundle.as_deref() == Some(bundle)
            }
            None => entry == &self.target.target_type,
        })
    }
}
