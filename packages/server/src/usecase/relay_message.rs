//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - サーバー側でのメッセージ確定（id・タイムスタンプ・既読フラグの付与）と配信
//!
//! ### なぜこのテストが必要か
//! - 会話の全接続（送信者自身を含む）に同じメッセージが届くことを保証
//! - 別の会話には配信されないことを確認
//! - 不正な本文が中継されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：双方向の中継
//! - 異常系：空の本文、長すぎる本文
//! - 異常系：存在しない会話への中継

use std::sync::Arc;

use rentchat_shared::{Message, UserId, time::now_utc};

use crate::domain::{
    ConversationId, ConversationRepository, MessageIdFactory, entity::validate_content,
};

use super::error::RelayError;

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ中継を実行
    ///
    /// 宛先・送信者・リスティングは接続から決まり、クライアントが送ってきた値は使いません。
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - 中継先の会話
    /// * `sender_id` - 送信した接続のユーザー
    /// * `content` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 確定して配信したメッセージ
    /// * `Err(RelayError)` - 中継失敗
    pub async fn execute(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        content: String,
    ) -> Result<Message, RelayError> {
        // 1. 本文の検証
        validate_content(&content)?;

        // 2. 宛先の決定
        if self.repository.get_conversation(conversation_id).await.is_none() {
            return Err(RelayError::ConversationNotFound(conversation_id.to_string()));
        }
        let receiver_id = conversation_id
            .counterpart(sender_id)
            .ok_or_else(|| RelayError::NotAParticipant(sender_id.to_string()))?;

        // 3. メッセージの確定
        let now = now_utc();
        let message = Message {
            id: MessageIdFactory::generate(),
            content,
            listing_id: conversation_id.listing_id().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            is_read: false,
            sent_at: now,
            updated_at: now,
        };

        // 4. 履歴への追加
        self.repository
            .add_message(conversation_id, message.clone())
            .await?;

        // 5. 会話の全接続に配信（送信者自身を含む）
        let json =
            serde_json::to_string(&message).map_err(|e| RelayError::Encode(e.to_string()))?;
        for (connection_id, sender) in self.repository.get_senders(conversation_id).await {
            if sender.send(json.clone()).is_err() {
                tracing::warn!("Failed to relay message to connection '{}'", connection_id);
            }
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConversationError, entity::MAX_CONTENT_LENGTH},
        infrastructure::repository::InMemoryConversationRepository,
        usecase::JoinConversationUseCase,
    };
    use rentchat_shared::ListingId;
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn conversation_id(listing: &str) -> ConversationId {
        ConversationId::new(
            ListingId::new(listing.to_string()).unwrap(),
            user("U1"),
            user("U2"),
        )
    }

    #[tokio::test]
    async fn test_relay_message_to_all_connections() {
        // テスト項目: 送信者を含む会話の全接続にメッセージが配信される
        // given (前提条件):
        let repository = Arc::new(InMemoryConversationRepository::new());
        let join = JoinConversationUseCase::new(repository.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        join.execute(conversation_id("L1"), user("U1"), tx1).await.unwrap();
        join.execute(conversation_id("L1"), user("U2"), tx2).await.unwrap();
        let usecase = RelayMessageUseCase::new(repository.clone());

        // when (操作):
        let result = usecase
            .execute(&conversation_id("L1"), &user("U1"), "hello".to_string())
            .await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(message.listing_id, "L1");
        assert_eq!(message.sender_id, "U1");
        assert_eq!(message.receiver_id, "U2");
        assert!(!message.is_read);
        assert_eq!(message.sent_at, message.updated_at);
        assert!(!message.id.is_empty());

        for rx in [&mut rx1, &mut rx2] {
            let json = rx.try_recv().unwrap();
            let received: Message = serde_json::from_str(&json).unwrap();
            assert_eq!(received, message);
        }

        let conversation = repository.get_conversation(&conversation_id("L1")).await.unwrap();
        assert_eq!(conversation.messages, vec![message]);
    }

    #[tokio::test]
    async fn test_relay_message_stays_in_conversation() {
        // テスト項目: 別の会話の接続にはメッセージが届かない
        // given (前提条件):
        let repository = Arc::new(InMemoryConversationRepository::new());
        let join = JoinConversationUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        join.execute(conversation_id("L1"), user("U1"), tx1).await.unwrap();
        join.execute(conversation_id("L2"), user("U2"), tx2).await.unwrap();
        let usecase = RelayMessageUseCase::new(repository);

        // when (操作):
        usecase
            .execute(&conversation_id("L1"), &user("U1"), "hello".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_rejects_invalid_content() {
        // テスト項目: 空の本文・長すぎる本文は中継されない
        // given (前提条件):
        let repository = Arc::new(InMemoryConversationRepository::new());
        let join = JoinConversationUseCase::new(repository.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        join.execute(conversation_id("L1"), user("U1"), tx).await.unwrap();
        let usecase = RelayMessageUseCase::new(repository);

        // when (操作):
        let empty = usecase
            .execute(&conversation_id("L1"), &user("U1"), String::new())
            .await;
        let too_long = usecase
            .execute(
                &conversation_id("L1"),
                &user("U1"),
                "a".repeat(MAX_CONTENT_LENGTH + 1),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            empty,
            Err(RelayError::InvalidContent(ConversationError::ContentEmpty))
        );
        assert_eq!(
            too_long,
            Err(RelayError::InvalidContent(ConversationError::ContentTooLong {
                max: MAX_CONTENT_LENGTH,
                actual: MAX_CONTENT_LENGTH + 1,
            }))
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_to_unknown_conversation() {
        // テスト項目: 存在しない会話への中継はエラー
        // given (前提条件):
        let repository = Arc::new(InMemoryConversationRepository::new());
        let usecase = RelayMessageUseCase::new(repository);

        // when (操作):
        let result = usecase
            .execute(&conversation_id("L1"), &user("U1"), "hello".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RelayError::ConversationNotFound(_))));
    }
}
