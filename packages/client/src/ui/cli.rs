//! Command-line arguments of the chat client.

use std::time::Duration;

use clap::Parser;
use rentchat_shared::UserId;

use crate::{
    config::{ChatConfig, DEFAULT_API_BASE_URL},
    domain::ConversationKey,
    error::ChatError,
};

/// Chat with the other party of a rental listing.
#[derive(Debug, Clone, Parser)]
#[command(name = "rentchat-client", version, about)]
pub struct ClientArgs {
    /// REST base URL of the backend (the chat URL is derived from it)
    #[arg(long, env = "RENTCHAT_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Listing the conversation is about
    #[arg(long, env = "RENTCHAT_LISTING_ID")]
    pub listing: String,

    /// User to chat with
    #[arg(long, env = "RENTCHAT_RECEIVER_ID")]
    pub receiver: String,

    /// Your own user id
    #[arg(long, env = "RENTCHAT_SENDER_ID")]
    pub sender: String,

    /// Session token
    #[arg(long, env = "RENTCHAT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Run without a backend; sent messages are echoed locally
    #[arg(long, env = "RENTCHAT_USE_MOCK_API")]
    pub mock: bool,

    /// Echo delay in mock mode, in milliseconds
    #[arg(long, env = "RENTCHAT_MOCK_API_DELAY_MS", default_value_t = 500)]
    pub mock_delay_ms: u64,
}

impl ClientArgs {
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            api_base_url: self.api_base_url.clone(),
            use_mock_api: self.mock,
            mock_api_delay: Duration::from_millis(self.mock_delay_ms),
        }
    }

    pub fn conversation_key(&self) -> Result<ConversationKey, ChatError> {
        Ok(ConversationKey::try_new(
            self.listing.as_str(),
            self.receiver.as_str(),
            self.token.as_str(),
        )?)
    }

    pub fn sender_id(&self) -> Result<UserId, ChatError> {
        Ok(UserId::new(self.sender.clone())?)
    }
}
