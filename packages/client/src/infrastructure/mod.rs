//! Infrastructure layer
//!
//! ドメイン層が定義する trait（ChatTransport, MessageSink）の具体的な実装を提供します。

pub mod sink;
pub mod transport;

pub use sink::{BroadcastSink, InMemoryChatStore};
pub use transport::{MockTransport, WebSocketTransport, build_chat_url, build_transport};
