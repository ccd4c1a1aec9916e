//! Access policy for anonymous visitors
//!
//! Accounts may always view, react and remove; anonymous visitors only where
//! the configured [`AnonymousAccess`] allows it.

use reactions_common::AnonymousAccess;
use reactions_service::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction {
    View,
    React,
    Remove,
}

impl ReactionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::React => "react",
            Self::Remove => "remove",
        }
    }

    fn allowed_for_anonymous(self, access: &AnonymousAccess) -> bool {
        match self {
            Self::View => access.can_view,
            Self::React => access.can_react,
            Self::Remove => access.can_remove,
        }
    }
}

pub fn ensure_allowed(
    access: &AnonymousAccess,
    anonymous: bool,
    action: ReactionAction,
) -> Result<(), ServiceError> {
    if anonymous && !action.allowed_for_anonymous(access) {
        return Err(ServiceError::permission_denied(action.as_str()));
    }
    Ok(())
}
