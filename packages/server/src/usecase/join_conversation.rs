//! UseCase: 会話への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinConversationUseCase::execute() メソッド
//! - 接続 ID の採番と Repository への登録
//!
//! ### なぜこのテストが必要か
//! - 同じユーザーが複数の接続を持てることを保証（タブを複数開くケース）
//! - 接続数の上限を超えた場合に ConversationFull が返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - 正常系：同一ユーザーの 2 本目の接続
//! - 異常系：会話の容量超過

use std::sync::Arc;

use rentchat_shared::{UserId, time::now_utc};
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, ConversationId, ConversationRepository, Member,
};

use super::error::JoinError;

/// 会話参加のユースケース
pub struct JoinConversationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
}

impl JoinConversationUseCase {
    /// 新しい JoinConversationUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// 会話への参加を実行
    ///
    /// # Arguments
    ///
    /// * `conversation_id` - 参加する会話
    /// * `user_id` - 接続してきたユーザー
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 採番された接続 ID
    /// * `Err(JoinError)` - 参加失敗
    pub async fn execute(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        sender: UnboundedSender<String>,
    ) -> Result<ConnectionId, JoinError> {
        let connection_id = ConnectionIdFactory::generate();
        let member = Member::new(connection_id.clone(), user_id, now_utc());

        self.repository
            .add_member(conversation_id, member, sender)
            .await?;

        Ok(connection_id)
    }
}
