//! The chat transport capability set.

use rentchat_shared::CreateMessagePayload;

use super::connection::{ConnectionState, ConversationKey};

/// One logical chat connection.
///
/// All operations return immediately; their outcomes arrive later through the
/// [`MessageSink`](super::MessageSink) the transport was built with, and through
/// [`state`](ChatTransport::state). Failures are logged, never returned.
#[cfg_attr(test, mockall::automock)]
pub trait ChatTransport: Send {
    /// Open a connection for `key`. No-op while a connection is open or opening.
    fn connect(&mut self, key: &ConversationKey);

    /// Send a message. Dropped with a warning when there is nowhere to send it.
    fn send(&mut self, payload: CreateMessagePayload);

    /// Close and discard the connection, if any. Never fails.
    fn disconnect(&mut self);

    fn state(&self) -> ConnectionState;
}
