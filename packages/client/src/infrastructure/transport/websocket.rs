//! WebSocket transport
//!
//! tokio-tungstenite による実通信の ChatTransport 実装。
//! 接続ごとに 1 つのタスクを起動し、受信フレームと送信コマンドを `select!` で処理します。

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message as Frame};

use super::endpoint::build_chat_url;
use crate::{
    domain::{
        ChatTransport, ConnectionState, ConversationKey, CreateMessagePayload, MessageFactory,
        MessageSink, PartialMessage,
    },
    error::ChatError,
};

/// Command from the transport to its connection task.
#[derive(Debug)]
enum Outbound {
    Frame(String),
    Close,
}

/// Handle to one spawned connection.
struct LiveConnection {
    key: ConversationKey,
    state: watch::Receiver<ConnectionState>,
    outbound: mpsc::UnboundedSender<Outbound>,
    task: JoinHandle<()>,
}

impl LiveConnection {
    fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }
}

/// Chat transport over a real WebSocket.
pub struct WebSocketTransport {
    api_base_url: String,
    sink: Arc<dyn MessageSink>,
    factory: MessageFactory,
    connection: Option<LiveConnection>,
}

impl WebSocketTransport {
    pub fn new(
        api_base_url: impl Into<String>,
        sink: Arc<dyn MessageSink>,
        factory: MessageFactory,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            sink,
            factory,
            connection: None,
        }
    }

    /// State updates of the current connection, if there is one.
    pub fn state_changes(&self) -> Option<watch::Receiver<ConnectionState>> {
        self.connection.as_ref().map(|c| c.state.clone())
    }

    fn open(&self, key: &ConversationKey) -> Result<LiveConnection, ChatError> {
        let url = build_chat_url(&self.api_base_url, key)?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ChatError::NoRuntime)?;

        tracing::info!(
            "Connecting to chat WebSocket: {}://{}{}",
            url.scheme(),
            url.host_str().unwrap_or_default(),
            url.path()
        );

        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let task = runtime.spawn(run_connection(
            url.to_string(),
            state_tx,
            outbound_rx,
            Arc::clone(&self.sink),
            self.factory.clone(),
        ));

        Ok(LiveConnection {
            key: key.clone(),
            state: state_rx,
            outbound: outbound_tx,
            task,
        })
    }
}

impl ChatTransport for WebSocketTransport {
    fn connect(&mut self, key: &ConversationKey) {
        if self.state().is_active() {
            tracing::debug!("Chat WebSocket already open or opening; ignoring connect for {key}");
            return;
        }

        match self.open(key) {
            Ok(connection) => self.connection = Some(connection),
            Err(e) => {
                tracing::error!("Error creating chat WebSocket for {key}: {e}");
                self.connection = None;
            }
        }
    }

    fn send(&mut self, payload: CreateMessagePayload) {
        let Some(connection) = self
            .connection
            .as_ref()
            .filter(|c| c.state() == ConnectionState::Open)
        else {
            tracing::warn!("Chat WebSocket not open; cannot send message");
            return;
        };

        let json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize chat message: {e}");
                return;
            }
        };
        if connection.outbound.send(Outbound::Frame(json)).is_err() {
            tracing::warn!("Chat WebSocket for {} has gone away; message dropped", connection.key);
        }
    }

    fn disconnect(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        match connection.state() {
            // A failed send only means the task already stopped.
            ConnectionState::Open => {
                let _ = connection.outbound.send(Outbound::Close);
            }
            ConnectionState::Connecting => connection.task.abort(),
            ConnectionState::Idle | ConnectionState::Closed => {}
        }
        tracing::info!("Disconnected chat WebSocket for {}", connection.key);
    }

    fn state(&self) -> ConnectionState {
        self.connection
            .as_ref()
            .map_or(ConnectionState::Idle, LiveConnection::state)
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Connection task: handshake, then pump frames until either side closes.
async fn run_connection(
    url: String,
    state: watch::Sender<ConnectionState>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    sink: Arc<dyn MessageSink>,
    factory: MessageFactory,
) {
    let stream = match connect_async(url).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            report_transport_error(*state.borrow(), &e);
            state.send_replace(ConnectionState::Closed);
            return;
        }
    };
    state.send_replace(ConnectionState::Open);
    tracing::info!("Chat WebSocket open");

    let (mut writer, mut reader) = stream.split();
    loop {
        tokio::select! {
            incoming = reader.next() => match incoming {
                Some(Ok(Frame::Text(text))) => dispatch_frame(text.as_str(), sink.as_ref(), &factory),
                Some(Ok(Frame::Close(frame))) => {
                    let reason = frame.map(|f| f.reason.as_str().to_string()).unwrap_or_default();
                    tracing::warn!("Chat WebSocket closed by peer: {reason}");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    report_transport_error(*state.borrow(), &e);
                    break;
                }
                None => {
                    tracing::warn!("Chat WebSocket stream ended");
                    break;
                }
            },
            command = outbound.recv() => match command {
                Some(Outbound::Frame(json)) => {
                    if let Err(e) = writer.send(Frame::Text(json.into())).await {
                        report_transport_error(*state.borrow(), &e);
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    if let Err(e) = writer.close().await {
                        tracing::debug!("Ignoring chat WebSocket close error: {e}");
                    }
                    break;
                }
            },
        }
    }

    state.send_replace(ConnectionState::Closed);
}

/// Parse one inbound text frame and publish it.
///
/// A frame that is not a JSON object of message fields is logged and skipped;
/// the connection stays up.
fn dispatch_frame(text: &str, sink: &dyn MessageSink, factory: &MessageFactory) {
    match PartialMessage::from_frame(text) {
        Ok(raw) => sink.publish(factory.normalize(raw)),
        Err(e) => tracing::error!("Dropping malformed chat frame: {e}"),
    }
}

fn report_transport_error(state: ConnectionState, error: &dyn std::fmt::Display) {
    if state.should_report_transport_error() {
        tracing::error!("Chat WebSocket error: {error}");
    } else {
        tracing::debug!("Chat WebSocket error before open (ignored): {error}");
    }
}
