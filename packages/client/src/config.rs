//! Chat transport configuration.

use std::time::Duration;

/// Default backend address (the development relay server).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default delay before the mock transport echoes a sent message.
pub const DEFAULT_MOCK_API_DELAY: Duration = Duration::from_millis(500);

/// Settings the chat transport is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// REST base URL; the WebSocket URL is derived from it
    pub api_base_url: String,
    /// Run without a backend (messages are echoed locally)
    pub use_mock_api: bool,
    /// Echo delay in mock mode
    pub mock_api_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            use_mock_api: false,
            mock_api_delay: DEFAULT_MOCK_API_DELAY,
        }
    }
}

impl ChatConfig {
    /// Configuration for mock mode with the given echo delay.
    pub fn mock(mock_api_delay: Duration) -> Self {
        Self {
            use_mock_api: true,
            mock_api_delay,
            ..Self::default()
        }
    }

    /// Configuration for a real backend at `api_base_url`.
    pub fn live(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}
