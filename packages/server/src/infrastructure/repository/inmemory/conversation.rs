//! InMemory Conversation Repository 実装
//!
//! ドメイン層が定義する ConversationRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。サーバーを再起動すると会話は失われます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use rentchat_shared::Message;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{
    ConnectionId, Conversation, ConversationId, ConversationRepository, Member, RepositoryError,
    entity::DEFAULT_MESSAGE_CAPACITY,
};

/// 会話ごとのデータ
struct ConversationEntry {
    /// Conversation ドメインモデル
    conversation: Conversation,
    /// 接続ごとの WebSocket 送信チャンネル
    senders: HashMap<ConnectionId, UnboundedSender<String>>,
}

/// インメモリ Conversation Repository 実装
///
/// HashMap をインメモリ DB として使用する実装。
/// ドメイン層の ConversationRepository trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<Mutex<HashMap<ConversationId, ConversationEntry>>>,
    /// 会話を新規作成するときの接続数上限
    connection_capacity: Option<usize>,
}

impl InMemoryConversationRepository {
    /// 新しい InMemoryConversationRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 会話ごとの接続数上限を指定して作成
    pub fn with_connection_capacity(connection_capacity: usize) -> Self {
        Self {
            connection_capacity: Some(connection_capacity),
            ..Self::default()
        }
    }

    fn new_conversation(&self, id: ConversationId) -> Conversation {
        match self.connection_capacity {
            Some(capacity) => Conversation::with_capacity(id, capacity, DEFAULT_MESSAGE_CAPACITY),
            None => Conversation::new(id),
        }
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn add_member(
        &self,
        conversation_id: ConversationId,
        member: Member,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        let entry = conversations
            .entry(conversation_id.clone())
            .or_insert_with(|| ConversationEntry {
                conversation: self.new_conversation(conversation_id),
                senders: HashMap::new(),
            });

        // Domain model validates capacity first; only then register the channel
        let connection_id = member.connection_id.clone();
        entry.conversation.add_member(member)?;
        entry.senders.insert(connection_id, sender);
        Ok(())
    }

    async fn remove_member(
        &self,
        conversation_id: &ConversationId,
        connection_id: &ConnectionId,
    ) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        let entry = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(conversation_id.to_string()))?;

        entry.senders.remove(connection_id);
        if !entry.conversation.remove_member(connection_id) {
            return Err(RepositoryError::ConnectionNotFound(connection_id.to_string()));
        }

        if entry.conversation.is_empty() {
            conversations.remove(conversation_id);
        }
        Ok(())
    }

    async fn add_message(
        &self,
        conversation_id: &ConversationId,
        message: Message,
    ) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.lock().await;
        let entry = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(conversation_id.to_string()))?;
        entry.conversation.add_message(message);
        Ok(())
    }

    async fn get_conversation(&self, conversation_id: &ConversationId) -> Option<Conversation> {
        let conversations = self.conversations.lock().await;
        conversations
            .get(conversation_id)
            .map(|entry| entry.conversation.clone())
    }

    async fn get_senders(
        &self,
        conversation_id: &ConversationId,
    ) -> Vec<(ConnectionId, UnboundedSender<String>)> {
        let conversations = self.conversations.lock().await;
        conversations
            .get(conversation_id)
            .map(|entry| {
                entry
                    .senders
                    .iter()
                    .map(|(id, sender)| (id.clone(), sender.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn count_connections(&self) -> usize {
        let conversations = self.conversations.lock().await;
        conversations.values().map(|entry| entry.senders.len()).sum()
    }
}
