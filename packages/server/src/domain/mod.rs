//! Domain layer for the relay server.
//!
//! This module contains business logic that is independent of
//! transport and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;

pub use entity::{ConnectionId, Conversation, ConversationId, Member};
pub use error::{ConversationError, RepositoryError};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use repository::ConversationRepository;

#[cfg(test)]
pub use repository::MockConversationRepository;
