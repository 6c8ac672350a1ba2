//! UseCase: 会話からの退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveConversationUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の削除
//! - エッジケース：最後の接続の退出（会話ごと破棄される）
//! - 異常系：存在しない接続の退出

use std::sync::Arc;

use crate::domain::{ConnectionId, ConversationId, ConversationRepository, RepositoryError};

/// 会話退出のユースケース
pub struct LeaveConversationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConversationRepository>,
}

impl LeaveConversationUseCase {
    /// 新しい LeaveConversationUseCase を作成
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// 会話からの退出を実行
    pub async fn execute(
        &self,
        conversation_id: &ConversationId,
        connection_id: &ConnectionId,
    ) -> Result<(), RepositoryError> {
        self.repository
            .remove_member(conversation_id, connection_id)
            .await
    }
}
