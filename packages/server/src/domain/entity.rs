//! Core domain models for the relay server.

use std::fmt;

use chrono::{DateTime, Utc};
use rentchat_shared::{ListingId, Message, UserId};

use super::error::ConversationError;

/// Default maximum number of connections allowed in a conversation
pub const DEFAULT_CONNECTION_CAPACITY: usize = 10;

/// Default number of messages kept in a conversation's history
pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

/// Maximum length of a message's content, in characters
pub const MAX_CONTENT_LENGTH: usize = 10000;

/// Identifies a conversation: one listing, two users, either direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationId {
    listing_id: ListingId,
    /// Sorted pair, so (a, b) and (b, a) name the same conversation
    users: (UserId, UserId),
}

impl ConversationId {
    pub fn new(listing_id: ListingId, user_a: UserId, user_b: UserId) -> Self {
        let users = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };
        Self { listing_id, users }
    }

    pub fn listing_id(&self) -> &ListingId {
        &self.listing_id
    }

    /// The other user of the conversation, if `user` takes part in it.
    pub fn counterpart(&self, user: &UserId) -> Option<&UserId> {
        if &self.users.0 == user {
            Some(&self.users.1)
        } else if &self.users.1 == user {
            Some(&self.users.0)
        } else {
            None
        }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.listing_id, self.users.0, self.users.1)
    }
}

/// Identifies one WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connection taking part in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub connected_at: DateTime<Utc>,
}

impl Member {
    pub fn new(connection_id: ConnectionId, user_id: UserId, connected_at: DateTime<Utc>) -> Self {
        Self {
            connection_id,
            user_id,
            connected_at,
        }
    }
}

/// A listing conversation with its live connections and recent history
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: ConversationId,
    /// Connections currently joined (a user may have several)
    pub members: Vec<Member>,
    /// Most recent messages, oldest first
    pub messages: Vec<Message>,
    /// Maximum number of connections allowed (default: 10)
    pub connection_capacity: usize,
    /// Number of messages kept (default: 100)
    pub message_capacity: usize,
}

impl Conversation {
    /// Create an empty conversation with default capacities
    pub fn new(id: ConversationId) -> Self {
        Self::with_capacity(id, DEFAULT_CONNECTION_CAPACITY, DEFAULT_MESSAGE_CAPACITY)
    }

    /// Create an empty conversation with custom capacities
    pub fn with_capacity(
        id: ConversationId,
        connection_capacity: usize,
        message_capacity: usize,
    ) -> Self {
        Self {
            id,
            members: Vec::new(),
            messages: Vec::new(),
            connection_capacity,
            message_capacity,
        }
    }

    /// Add a connection to the conversation
    ///
    /// # Errors
    ///
    /// Returns `ConversationError::CapacityExceeded` if the conversation is at full capacity
    pub fn add_member(&mut self, member: Member) -> Result<(), ConversationError> {
        if self.members.len() >= self.connection_capacity {
            return Err(ConversationError::CapacityExceeded {
                capacity: self.connection_capacity,
                current: self.members.len(),
            });
        }
        self.members.push(member);
        Ok(())
    }

    /// Remove a connection. Returns whether it was a member.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() != before
    }

    /// Append a message, evicting the oldest once the history is full
    pub fn add_message(&mut self, message: Message) {
        if self.message_capacity == 0 {
            return;
        }
        if self.messages.len() >= self.message_capacity {
            let overflow = self.messages.len() + 1 - self.message_capacity;
            self.messages.drain(..overflow);
        }
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Check a message body before it is relayed
///
/// # Errors
///
/// Empty content, or content longer than [`MAX_CONTENT_LENGTH`] characters
pub fn validate_content(content: &str) -> Result<(), ConversationError> {
    if content.is_empty() {
        return Err(ConversationError::ContentEmpty);
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(ConversationError::ContentTooLong {
            max: MAX_CONTENT_LENGTH,
            actual: len,
        });
    }
    Ok(())
}
