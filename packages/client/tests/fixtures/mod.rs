//! Shared helpers for the chat transport integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rentchat_client::domain::{ConnectionState, Message};
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        Message as Frame,
        handshake::server::{ErrorResponse, Request, Response},
    },
};

pub const WAIT: Duration = Duration::from_secs(5);

/// What the backend saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// A handshake completed, with the requested path and query
    Connected(String),
    Text(String),
    Closed,
}

/// Command to a connection of the backend.
#[derive(Debug)]
enum Push {
    Text(String),
    Close,
}

/// Bare WebSocket backend that records everything it receives.
pub struct TestBackend {
    addr: SocketAddr,
    events: mpsc::UnboundedReceiver<BackendEvent>,
    connections: Arc<Mutex<Vec<mpsc::UnboundedSender<Push>>>>,
    handle: JoinHandle<()>,
}

impl TestBackend {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (events_tx, events) = mpsc::unbounded_channel();
        let connections = Arc::new(Mutex::new(Vec::new()));

        let registry = Arc::clone(&connections);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (push_tx, push_rx) = mpsc::unbounded_channel();
                registry.lock().push(push_tx);
                tokio::spawn(serve_connection(stream, events_tx.clone(), push_rx));
            }
        });

        Self {
            addr,
            events,
            connections,
            handle,
        }
    }

    pub fn api_base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Send a text frame on every open connection
    pub fn push_text(&self, text: &str) {
        for connection in self.connections.lock().iter() {
            let _ = connection.send(Push::Text(text.to_string()));
        }
    }

    /// Close every open connection from the server side
    pub fn close_all(&self) {
        for connection in self.connections.lock().drain(..) {
            let _ = connection.send(Push::Close);
        }
    }

    pub async fn next_event(&mut self) -> BackendEvent {
        tokio::time::timeout(WAIT, self.events.recv())
            .await
            .expect("Timed out waiting for a backend event")
            .expect("Backend stopped")
    }

    /// Asserts the backend sees nothing within `wait`
    pub async fn assert_quiet(&mut self, wait: Duration) {
        if let Ok(Some(event)) = tokio::time::timeout(wait, self.events.recv()).await {
            panic!("Unexpected backend event: {event:?}");
        }
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_connection(
    stream: tokio::net::TcpStream,
    events: mpsc::UnboundedSender<BackendEvent>,
    mut pushes: mpsc::UnboundedReceiver<Push>,
) {
    let mut requested = String::new();
    let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        requested = request.uri().to_string();
        Ok(response)
    };
    let Ok(ws) = accept_hdr_async(stream, callback).await else {
        return;
    };
    let _ = events.send(BackendEvent::Connected(requested));

    let (mut writer, mut reader) = ws.split();
    loop {
        tokio::select! {
            incoming = reader.next() => match incoming {
                Some(Ok(Frame::Text(text))) => {
                    let _ = events.send(BackendEvent::Text(text.as_str().to_string()));
                }
                Some(Ok(Frame::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            push = pushes.recv() => match push {
                Some(Push::Text(text)) => {
                    if writer.send(Frame::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Some(Push::Close) | None => {
                    let _ = writer.close().await;
                    break;
                }
            },
        }
    }
    let _ = events.send(BackendEvent::Closed);
}

/// Next message published to the subscriber
pub async fn next_message(messages: &mut broadcast::Receiver<Message>) -> Message {
    tokio::time::timeout(WAIT, messages.recv())
        .await
        .expect("Timed out waiting for a message")
        .expect("Sink closed")
}

/// Poll `state` until it reports `expected`
pub async fn wait_for_state(state: impl Fn() -> ConnectionState, expected: ConnectionState) {
    tokio::time::timeout(WAIT, async {
        while state() != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("Timed out waiting for {expected}, still {}", state()));
}
