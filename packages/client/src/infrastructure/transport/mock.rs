//! Mock transport
//!
//! バックエンドなしで UI を動かすための ChatTransport 実装。
//! ネットワークには一切接続せず、送信したメッセージを一定時間後にローカルで「エコー」します。
//! 認証・永続化・他者への配信は行いません。

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::domain::{
    ChatTransport, ConnectionState, ConversationKey, CreateMessagePayload, MessageFactory,
    MessageSink,
};

/// Transport that simulates a server echo after a fixed delay.
pub struct MockTransport {
    delay: Duration,
    sink: Arc<dyn MessageSink>,
    factory: MessageFactory,
    connected: bool,
    pending: Vec<JoinHandle<()>>,
}

impl MockTransport {
    pub fn new(delay: Duration, sink: Arc<dyn MessageSink>, factory: MessageFactory) -> Self {
        Self {
            delay,
            sink,
            factory,
            connected: false,
            pending: Vec::new(),
        }
    }

    /// Echoes scheduled but not yet delivered.
    pub fn pending_echoes(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }
}

impl ChatTransport for MockTransport {
    fn connect(&mut self, key: &ConversationKey) {
        if self.connected {
            return;
        }
        tracing::info!("Using mock chat transport for {key} - no real connection will be made");
        self.connected = true;
    }

    fn send(&mut self, payload: CreateMessagePayload) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No tokio runtime; mock echo dropped");
            return;
        };

        self.pending.retain(|h| !h.is_finished());

        let delay = self.delay;
        let sink = Arc::clone(&self.sink);
        let factory = self.factory.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            sink.publish(factory.echo(payload));
        });
        self.pending.push(handle);
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn state(&self) -> ConnectionState {
        if self.connected {
            ConnectionState::Open
        } else {
            ConnectionState::Idle
        }
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        for handle in &self.pending {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sink::BroadcastSink;

    const DELAY: Duration = Duration::from_millis(20);

    fn create_test_transport() -> (MockTransport, BroadcastSink) {
        let sink = BroadcastSink::default();
        let transport = MockTransport::new(DELAY, Arc::new(sink.clone()), MessageFactory::system());
        (transport, sink)
    }

    fn key() -> ConversationKey {
        ConversationKey::try_new("L1", "U2", "T").unwrap()
    }

    #[test]
    fn test_connect_is_synchronous() {
        // テスト項目: connect 直後に接続済みになる（ネットワーク不要）
        // given (前提条件):
        let (mut transport, _sink) = create_test_transport();

        // when (操作):
        transport.connect(&key());

        // then (期待する結果):
        assert_eq!(transport.state(), ConnectionState::Open);
    }

    #[test]
    fn test_disconnect_clears_connected_flag() {
        // テスト項目: disconnect で接続フラグが下がり、2 回目も問題ない
        // given (前提条件):
        let (mut transport, _sink) = create_test_transport();
        transport.connect(&key());

        // when (操作):
        transport.disconnect();
        transport.disconnect();

        // then (期待する結果):
        assert_eq!(transport.state(), ConnectionState::Idle);
    }

    #[tokio::test]
    async fn test_send_echoes_once_after_delay() {
        // テスト項目: 送信すると遅延後に 1 件だけ、未読・新規 id のメッセージが publish される
        // given (前提条件):
        let (mut transport, sink) = create_test_transport();
        let mut receiver = sink.subscribe();
        transport.connect(&key());

        // when (操作):
        transport.send(CreateMessagePayload::new("hi", "L1", "U1", "U2"));

        // then (期待する結果): 遅延前には届かない
        assert!(receiver.try_recv().is_err());
        assert_eq!(transport.pending_echoes(), 1);

        let message = tokio::time::timeout(Duration::from_secs(2), receiver.recv())
            .await
            .expect("echo not delivered")
            .unwrap();
        assert_eq!(message.content, "hi");
        assert_eq!(message.listing_id, "L1");
        assert_eq!(message.sender_id, "U1");
        assert_eq!(message.receiver_id, "U2");
        assert!(!message.is_read);
        assert!(!message.id.is_empty());
        assert_eq!(message.sent_at, message.updated_at);

        tokio::time::sleep(DELAY * 3).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_each_send_gets_fresh_id() {
        // テスト項目: 送信ごとに異なる id が振られる
        // given (前提条件):
        let (mut transport, sink) = create_test_transport();
        let mut receiver = sink.subscribe();

        // when (操作):
        transport.send(CreateMessagePayload::new("a", "L1", "U1", "U2"));
        transport.send(CreateMessagePayload::new("b", "L1", "U1", "U2"));

        // then (期待する結果):
        let first = receiver.recv().await.unwrap();
        let second = receiver.recv().await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_drop_aborts_pending_echoes() {
        // テスト項目: トランスポートを破棄すると未配信のエコーは配信されない
        // given (前提条件):
        let (mut transport, sink) = create_test_transport();
        let mut receiver = sink.subscribe();
        transport.send(CreateMessagePayload::new("late", "L1", "U1", "U2"));

        // when (操作):
        drop(transport);
        tokio::time::sleep(DELAY * 3).await;

        // then (期待する結果):
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_send_outside_runtime_is_dropped() {
        // テスト項目: ランタイム外での送信はパニックせずに破棄される
        // given (前提条件):
        let (mut transport, _sink) = create_test_transport();

        // when (操作):
        transport.send(CreateMessagePayload::new("hi", "L1", "U1", "U2"));

        // then (期待する結果):
        assert_eq!(transport.pending_echoes(), 0);
    }
}
