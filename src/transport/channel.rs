use super::{PushMessage, PushTransport};
use crate::error::{NotifierError, Result};
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Create a channel-fed transport and the sender feeding it
///
/// The transport sees the end of the stream once every `PushSender` clone is
/// dropped.
pub fn channel() -> (PushSender, ChannelTransport) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        PushSender { sender },
        ChannelTransport {
            receiver,
            topics: HashSet::new(),
            started: false,
        },
    )
}

/// Producer side of a [`ChannelTransport`]
#[derive(Debug, Clone)]
pub struct PushSender {
    sender: mpsc::UnboundedSender<PushMessage>,
}

impl PushSender {
    /// Deliver a message; fails once the transport is gone
    pub fn send(&self, message: PushMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| NotifierError::Transport("transport is closed".to_string()))
    }
}

/// Transport receiving messages over an in-process channel
///
/// Messages addressed to a topic are only yielded once that topic is
/// subscribed; messages without a topic always are.
#[derive(Debug)]
pub struct ChannelTransport {
    receiver: mpsc::UnboundedReceiver<PushMessage>,
    topics: HashSet<String>,
    started: bool,
}

impl ChannelTransport {
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Subscribed topics, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<_> = self.topics.iter().cloned().collect();
        topics.sort();
        topics
    }

    fn accepts(&self, message: &PushMessage) -> bool {
        message
            .topic
            .as_ref()
            .is_none_or(|topic| self.topics.contains(topic))
    }

    /// Next deliverable message, or `None` when the stream has ended
    pub async fn recv(&mut self) -> Option<PushMessage> {
        while let Some(message) = self.receiver.recv().await {
            if self.accepts(&message) {
                return Some(message);
            }
            tracing::debug!("Dropping message for unsubscribed topic {:?}", message.topic);
        }
        None
    }

    /// Next deliverable message already queued, without waiting
    pub fn try_recv(&mut self) -> Option<PushMessage> {
        while let Ok(message) = self.receiver.try_recv() {
            if self.accepts(&message) {
                return Some(message);
            }
            tracing::debug!("Dropping message for unsubscribed topic {:?}", message.topic);
        }
        None
    }
}

impl PushTransport for ChannelTransport {
    fn start(&mut self) -> Result<()> {
        self.started = true;
        tracing::info!("Channel transport started");
        Ok(())
    }

    fn subscribe_topic(&mut self, topic: &str) -> Result<()> {
        if !self.started {
            return Err(NotifierError::Transport(format!(
                "cannot subscribe to '{topic}' before the transport is started"
            )));
        }
        if self.topics.insert(topic.to_string()) {
            tracing::info!("Subscribed to topic {}", topic);
        }
        Ok(())
    }
}
