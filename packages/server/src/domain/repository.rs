//! Repository trait for conversations.
//!
//! The domain defines what it needs; `infrastructure::repository` provides it.

use async_trait::async_trait;
use rentchat_shared::Message;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::{ConnectionId, Conversation, ConversationId, Member},
    error::RepositoryError,
};

/// Storage of conversations and of the outbound channel of each connection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Add a connection to a conversation, creating the conversation if needed
    async fn add_member(
        &self,
        conversation_id: ConversationId,
        member: Member,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError>;

    /// Remove a connection; an emptied conversation is dropped
    async fn remove_member(
        &self,
        conversation_id: &ConversationId,
        connection_id: &ConnectionId,
    ) -> Result<(), RepositoryError>;

    /// Append a message to a conversation's history
    async fn add_message(
        &self,
        conversation_id: &ConversationId,
        message: Message,
    ) -> Result<(), RepositoryError>;

    async fn get_conversation(&self, conversation_id: &ConversationId) -> Option<Conversation>;

    /// Outbound channels of every connection of a conversation
    async fn get_senders(
        &self,
        conversation_id: &ConversationId,
    ) -> Vec<(ConnectionId, UnboundedSender<String>)>;

    async fn count_connections(&self) -> usize;
}
