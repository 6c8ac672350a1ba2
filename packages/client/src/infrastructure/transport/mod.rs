//! ChatTransport の実装と、その選択

pub mod endpoint;
pub mod mock;
pub mod websocket;

use std::sync::Arc;

pub use endpoint::build_chat_url;
pub use mock::MockTransport;
pub use websocket::WebSocketTransport;

use crate::{
    config::ChatConfig,
    domain::{ChatTransport, MessageFactory, MessageSink},
};

/// Build the transport the configuration asks for.
///
/// The choice between mock and real delivery is made here, once.
pub fn build_transport(
    config: &ChatConfig,
    sink: Arc<dyn MessageSink>,
    factory: MessageFactory,
) -> Box<dyn ChatTransport> {
    if config.use_mock_api {
        Box::new(MockTransport::new(config.mock_api_delay, sink, factory))
    } else {
        Box::new(WebSocketTransport::new(
            config.api_base_url.clone(),
            sink,
            factory,
        ))
    }
}
