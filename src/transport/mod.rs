//! Push transport boundary
//!
//! The store knows nothing about topics or devices. The owning application
//! starts a [`PushTransport`], subscribes the topics it cares about through
//! [`initialize`], and feeds every delivered [`PushMessage`] into
//! `NotificationStore::add_notification`, which [`pump`] does in a loop.

mod bootstrap;
mod channel;

pub use bootstrap::{drain_pending, initialize, pump};
pub use channel::{ChannelTransport, PushSender, channel};

use crate::core::{NewNotification, NotificationType};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when a push arrives without one
pub const DEFAULT_TITLE: &str = "New Notification";

/// Client side of a push service
pub trait PushTransport {
    /// Connect and start receiving messages
    fn start(&mut self) -> Result<()>;

    /// Register interest in `topic`
    fn subscribe_topic(&mut self, topic: &str) -> Result<()>;
}

/// Message delivered by the push transport
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl From<PushMessage> for NewNotification {
    fn from(message: PushMessage) -> Self {
        let mut data = message.data;
        let kind = match data.remove("type") {
            Some(Value::String(tag)) => NotificationType::from(tag),
            Some(other) => {
                // Not a tag; keep it as payload
                data.insert("type".to_string(), other);
                NotificationType::General
            },
            None => NotificationType::General,
        };

        Self {
            title: message.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            message: message.body.unwrap_or_default(),
            kind,
            data: if data.is_empty() {
                None
            } else {
                Some(Value::Object(data))
            },
        }
    }
}
