//! Redis Pub/Sub module.
//!
//! Publishes reaction events so rendered pages can refresh counts without polling.

mod channels;
mod listener;
mod publisher;

pub use channels::{PubSubChannel, ACCOUNT_CHANNEL_PREFIX, TARGET_CHANNEL_PREFIX};
pub use listener::PubSubReactionListener;
pub use publisher::{PubSubEvent, Publisher};
