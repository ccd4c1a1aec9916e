//! Forwards reaction events to Redis pub/sub

use async_trait::async_trait;

use reactions_core::events::ReactionEvent;
use reactions_core::traits::ReactionListener;
use reactions_core::{DomainError, ViewerKey};
use serde_json::Value;

use super::{PubSubChannel, PubSubEvent, Publisher};

pub struct PubSubReactionListener {
    publisher: Publisher,
}

impl PubSubReactionListener {
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }

    /// Channel an event is published on
    pub fn channel_for(event: &ReactionEvent) -> PubSubChannel {
        match event {
            ReactionEvent::AccountReactionsReleased { account_id, .. } => {
                PubSubChannel::account(*account_id)
            }
            other => match other.target() {
                Some(target) => PubSubChannel::target(target),
                None => PubSubChannel::Custom("reactions".to_string()),
            },
        }
    }

    /// Event body as published. Session tokens are bearer credentials, so
    /// anonymous viewers go out as plain `anon`.
    pub fn payload(event: &ReactionEvent) -> Result<Value, DomainError> {
        let mut data = serde_json::to_value(event)
            .map_err(|e| DomainError::InternalError(format!("event serialization: {e}")))?;

        if let (Some(viewer), Some(fields)) = (event.viewer(), data.as_object_mut()) {
            let public = match viewer {
                ViewerKey::Account(id) => format!("user:{id}"),
                ViewerKey::Anonymous(_) => "anon".to_string(),
            };
            fields.insert("viewer".to_string(), Value::String(public));
        }
        Ok(data)
    }
}

#[async_trait]
impl ReactionListener for PubSubReactionListener {
    async fn on_event(&self, event: &ReactionEvent) -> Result<(), DomainError> {
        let message = PubSubEvent::new(event.event_type(), Self::payload(event)?);

        self.publisher
            .publish(&Self::channel_for(event), &message)
            .await?;
        Ok(())
    }
}
