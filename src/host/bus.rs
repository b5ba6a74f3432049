//! Cross-component message bus.
//!
//! The bus is a broadcast channel carrying [`BoatMessage`]s. Delivery is
//! at-most-once: publishing with no subscribers drops the message, and a
//! subscriber that falls behind by more than the channel capacity loses the
//! oldest messages. Publishers get no acknowledgement.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topic on which boat selections are published.
pub const BOAT_MESSAGE_CHANNEL: &str = "BoatMessageChannel";

const DEFAULT_CAPACITY: usize = 64;

/// Message announcing that a boat record was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatMessage {
    /// Identifier of the selected boat.
    pub record_id: String,
}

/// Publish/subscribe handle for [`BoatMessage`]s.
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: broadcast::Sender<BoatMessage>,
}

impl MessageBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus that buffers up to `capacity` messages per subscriber.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a message to current subscribers. Fire-and-forget.
    pub fn publish(&self, message: BoatMessage) {
        match self.sender.send(message) {
            Ok(receivers) => {
                tracing::debug!(topic = BOAT_MESSAGE_CHANNEL, receivers, "message published");
            }
            Err(_) => {
                tracing::debug!(topic = BOAT_MESSAGE_CHANNEL, "no subscribers, message dropped");
            }
        }
    }

    /// Subscribes to messages published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoatMessage> {
        self.sender.subscribe()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
