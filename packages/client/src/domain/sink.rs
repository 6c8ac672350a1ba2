//! Dispatch sink: where normalized inbound messages are published.

use rentchat_shared::Message;

/// Publication point for messages received by a transport.
///
/// Every message is published exactly once, in transport order. Implementations
/// must not block; duplicate ids are passed through unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait MessageSink: Send + Sync {
    fn publish(&self, message: Message);
}
