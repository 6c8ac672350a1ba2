//! Domain factories for generating identifiers.

use super::entity::ConnectionId;

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Factory for generating message ids.
///
/// Message ids are assigned by the server when it relays a message.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new message id (UUID v4).
    pub fn generate() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
