//! Server state shared by the handlers.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::ConversationRepository;

/// Query parameters for the chat WebSocket endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    /// Caller's credential; the relay server treats it as the caller's user id
    pub token: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ConversationRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }
}
