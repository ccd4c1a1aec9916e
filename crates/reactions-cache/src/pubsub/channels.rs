//! Pub/Sub channel definitions.

use reactions_core::{Snowflake, TargetRef};

/// Channel prefix for events about one reacted-to target
pub const TARGET_CHANNEL_PREFIX: &str = "target:";
/// Channel prefix for account-level events
pub const ACCOUNT_CHANNEL_PREFIX: &str = "account:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Everyone rendering this target
    Target(TargetRef),
    Account(Snowflake),
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn target(target: &TargetRef) -> Self {
        Self::Target(target.clone())
    }

    #[must_use]
    pub fn account(account_id: Snowflake) -> Self {
        Self::Account(account_id)
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Target(target) => format!("{TARGET_CHANNEL_PREFIX}{target}"),
            Self::Account(id) => format!("{ACCOUNT_CHANNEL_PREFIX}{id}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if let Some((target_type, target_id)) = name
            .strip_prefix(TARGET_CHANNEL_PREFIX)
            .and_then(|rest| rest.split_once(':'))
        {
            if let Ok(target) = TargetRef::new(target_type, target_id) {
                return Self::Target(target);
            }
        }

        if let Some(id) = name.strip_prefix(ACCOUNT_CHANNEL_PREFIX) {
            if let Ok(id) = Snowflake::parse(id) {
                return Self::Account(id);
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let target = TargetRef::new("node", "12").unwrap();
        assert_eq!(PubSubChannel::target(&target).name(), "target:node:12");
        assert_eq!(PubSubChannel::account(Snowflake::new(5)).name(), "account:5");
    }

    #[test]
    fn test_channel_parse() {
        let target = TargetRef::new("comment", "a:b").unwrap();
        assert_eq!(
            PubSubChannel::parse("target:comment:a:b"),
            PubSubChannel::Target(target)
        );
        assert_eq!(
            PubSubChannel::parse("account:99"),
            PubSubChannel::Account(Snowflake::new(99))
        );
        assert_eq!(
            PubSubChannel::parse("target:"),
            PubSubChannel::Custom("target:".to_string())
        );
    }
}
