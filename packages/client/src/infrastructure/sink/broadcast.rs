//! Fan-out of inbound messages to every subscriber.

use rentchat_shared::Message;
use tokio::sync::broadcast;

use crate::domain::MessageSink;

/// Default number of messages a slow subscriber may lag behind.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Sink that announces each message to all current subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<Message>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every message published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl MessageSink for BroadcastSink {
    fn publish(&self, message: Message) {
        if self.sender.send(message).is_err() {
            tracing::debug!("No subscribers for chat message");
        }
    }
}
