//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Conversation domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// Connection capacity exceeded error
    #[error("Conversation capacity exceeded: maximum {capacity} connections allowed (current: {current})")]
    CapacityExceeded { capacity: usize, current: usize },

    /// MessageContent validation error
    #[error("Message content cannot be empty")]
    ContentEmpty,

    /// MessageContent too long error
    #[error("Message content cannot exceed {max} characters (got {actual})")]
    ContentTooLong { max: usize, actual: usize },
}

/// Errors raised by repositories
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Conversation(#[from] ConversationError),
}
