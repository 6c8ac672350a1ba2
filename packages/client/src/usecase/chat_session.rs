//! UseCase: 表示中の会話に対するチャット接続
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatSession::view() / send_message() / close() / Drop
//! - 表示する会話が変わったときの切断と再接続の順序
//!
//! ### なぜこのテストが必要か
//! - 会話の切り替え時に、古い接続を閉じてから新しい接続を開くことを保証する
//! - 同じ会話の再表示（再レンダリング相当）で余計な接続を作らないことを確認
//! - セッション破棄時に接続が必ず解放されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：会話を開く、切り替える、閉じる
//! - エッジケース：同じ会話の再表示、会話なしへの切り替え、未接続での close

use crate::domain::{ChatTransport, ConnectionState, ConversationKey, CreateMessagePayload};

/// 表示中の会話 1 つ分のチャット接続
///
/// 会話画面のライフサイクルに合わせて作成・破棄されることを想定しています。
/// 破棄（Drop）時には接続を必ず切断します。
pub struct ChatSession {
    /// 接続の実体（実通信またはモック）
    transport: Box<dyn ChatTransport>,
    /// 表示中の会話
    current: Option<ConversationKey>,
}

impl ChatSession {
    /// 新しい ChatSession を作成
    pub fn new(transport: Box<dyn ChatTransport>) -> Self {
        Self {
            transport,
            current: None,
        }
    }

    /// 表示する会話を切り替える
    ///
    /// # Arguments
    ///
    /// * `target` - 表示する会話。`None` なら会話を表示しない（接続しない）
    ///
    /// 表示中と同じ会話なら何もしません。異なる会話なら、先に現在の接続を切断してから
    /// 新しい会話に接続します。
    pub fn view(&mut self, target: Option<ConversationKey>) {
        if self.current == target {
            return;
        }

        if let Some(previous) = self.current.take() {
            tracing::debug!("Leaving conversation: {previous}");
            self.transport.disconnect();
        }

        if let Some(key) = target {
            tracing::debug!("Viewing conversation: {key}");
            self.transport.connect(&key);
            self.current = Some(key);
        }
    }

    /// 表示中の会話に再接続する
    ///
    /// 接続が切れている（または作成に失敗した）場合のみ connect を呼び直します。
    pub fn reconnect(&mut self) {
        let Some(key) = self.current.as_ref() else {
            return;
        };
        if !self.transport.state().is_active() {
            self.transport.connect(key);
        }
    }

    /// メッセージを送信
    pub fn send_message(&mut self, payload: CreateMessagePayload) {
        self.transport.send(payload);
    }

    /// 会話を閉じて接続を解放する
    pub fn close(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::debug!("Closing conversation: {previous}");
        }
        self.transport.disconnect();
    }

    /// 表示中の会話
    pub fn current(&self) -> Option<&ConversationKey> {
        self.current.as_ref()
    }

    /// 接続状態
    pub fn state(&self) -> ConnectionState {
        self.transport.state()
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}
