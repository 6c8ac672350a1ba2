//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConversationError, RepositoryError};

/// 会話への参加時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 会話の接続数が上限に達している
    #[error("Conversation is full: maximum {capacity} connections allowed")]
    ConversationFull { capacity: usize },

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for JoinError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Conversation(ConversationError::CapacityExceeded {
                capacity, ..
            }) => Self::ConversationFull { capacity },
            other => Self::Repository(other),
        }
    }
}

/// メッセージ中継時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// メッセージ本文が不正（空、または長すぎる）
    #[error(transparent)]
    InvalidContent(#[from] ConversationError),

    /// 中継先の会話が存在しない
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    /// 送信者が会話の参加者ではない
    #[error("User {0} does not take part in the conversation")]
    NotAParticipant(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Failed to encode message: {0}")]
    Encode(String),
}
