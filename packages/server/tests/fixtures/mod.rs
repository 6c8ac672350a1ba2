//! Shared helpers for the relay server integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use rentchat_shared::{CreateMessagePayload, Message};
use tokio::{net::TcpStream, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Relay server running in-process on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = rentchat_server::serve(listener, shutdown).await {
                panic!("Test server failed: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn chat_url(&self, listing_id: &str, receiver_id: &str, token: &str) -> String {
        format!(
            "ws://{}/v1/listings/{}/chat/{}?token={}",
            self.addr, listing_id, receiver_id, token
        )
    }

    /// Open a chat WebSocket as `token` (the caller's user id)
    pub async fn connect(&self, listing_id: &str, receiver_id: &str, token: &str) -> WsClient {
        let (ws, _) = connect_async(self.chat_url(listing_id, receiver_id, token))
            .await
            .expect("Failed to connect to chat endpoint");
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

pub async fn send_payload(ws: &mut WsClient, payload: &CreateMessagePayload) {
    let json = serde_json::to_string(payload).expect("Failed to encode payload");
    ws.send(WsMessage::Text(json.into()))
        .await
        .expect("Failed to send frame");
}

/// Next chat message on the socket, skipping control frames
pub async fn recv_message(ws: &mut WsClient) -> Message {
    let deadline = Duration::from_secs(5);
    loop {
        let frame = tokio::time::timeout(deadline, ws.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Socket closed")
            .expect("WebSocket error");
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Failed to decode message");
        }
    }
}

/// Asserts nothing arrives on the socket within `wait`
pub async fn assert_silent(ws: &mut WsClient, wait: Duration) {
    if let Ok(Some(Ok(WsMessage::Text(text)))) = tokio::time::timeout(wait, ws.next()).await {
        panic!("Unexpected message: {text}");
    }
}
