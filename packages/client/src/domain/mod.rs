//! Domain layer for the chat transport.
//!
//! This module contains the connection model, the message normalizer, and the
//! traits (transport, sink, clock, id generator) the other layers plug into.

pub mod connection;
pub mod factory;
pub mod sink;
pub mod transport;

pub use connection::{ConnectionState, ConversationKey};
pub use factory::{Clock, IdGenerator, MessageFactory, SystemClock, UuidIdGenerator};
pub use rentchat_shared::{
    AuthToken, CreateMessagePayload, ListingId, Message, PartialMessage, UserId, ValueObjectError,
};
pub use sink::MessageSink;
pub use transport::ChatTransport;
