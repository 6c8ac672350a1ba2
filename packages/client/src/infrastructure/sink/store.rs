//! In-memory chat store
//!
//! アプリケーション全体のチャット状態。受信したメッセージを到着順に保持し、
//! UI から既読化できるようにします。

use parking_lot::RwLock;
use rentchat_shared::Message;

use crate::domain::MessageSink;

/// Application-wide message list fed by a transport.
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored message in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Messages about `listing_id` exchanged between `user_a` and `user_b`, either direction.
    pub fn conversation(&self, listing_id: &str, user_a: &str, user_b: &str) -> Vec<Message> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.listing_id == listing_id)
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect()
    }

    /// Replace every message with this id by a read copy.
    ///
    /// # Returns
    ///
    /// Number of messages updated (0 when the id is unknown)
    pub fn mark_as_read(&self, id: &str) -> usize {
        let mut messages = self.messages.write();
        let mut updated = 0;
        for message in messages.iter_mut().filter(|m| m.id == id) {
            *message = message.as_read();
            updated += 1;
        }
        updated
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl MessageSink for InMemoryChatStore {
    fn publish(&self, message: Message) {
        self.messages.write().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageFactory, PartialMessage};

    fn message(id: &str, listing: &str, from: &str, to: &str) -> Message {
        MessageFactory::system().normalize(PartialMessage {
            id: Some(id.to_string()),
            content: Some(format!("{from} -> {to}")),
            listing_id: Some(listing.to_string()),
            sender_id: Some(from.to_string()),
            receiver_id: Some(to.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_publish_appends_in_order() {
        // テスト項目: publish したメッセージが到着順に保存される
        // given (前提条件):
        let store = InMemoryChatStore::new();

        // when (操作):
        store.publish(message("m1", "L1", "U1", "U2"));
        store.publish(message("m2", "L1", "U2", "U1"));

        // then (期待する結果):
        let ids: Vec<_> = store.messages().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_publish_keeps_duplicates() {
        // テスト項目: 同じ id のメッセージも重複排除されない
        // given (前提条件):
        let store = InMemoryChatStore::new();

        // when (操作):
        store.publish(message("m1", "L1", "U1", "U2"));
        store.publish(message("m1", "L1", "U1", "U2"));

        // then (期待する結果):
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_conversation_filters_listing_and_pair() {
        // テスト項目: 会話の抽出はリスティングと 2 者の組（向きは問わない）で行われる
        // given (前提条件):
        let store = InMemoryChatStore::new();
        store.publish(message("m1", "L1", "U1", "U2"));
        store.publish(message("m2", "L1", "U2", "U1"));
        store.publish(message("m3", "L2", "U1", "U2"));
        store.publish(message("m4", "L1", "U1", "U3"));

        // when (操作):
        let conversation = store.conversation("L1", "U1", "U2");

        // then (期待する結果):
        let ids: Vec<_> = conversation.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_mark_as_read() {
        // テスト項目: 既読化は対象 id のメッセージだけを既読のコピーに置き換える
        // given (前提条件):
        let store = InMemoryChatStore::new();
        store.publish(message("m1", "L1", "U1", "U2"));
        store.publish(message("m2", "L1", "U1", "U2"));

        // when (操作):
        let updated = store.mark_as_read("m1");

        // then (期待する結果):
        assert_eq!(updated, 1);
        let messages = store.messages();
        assert!(messages[0].is_read);
        assert!(!messages[1].is_read);
    }

    #[test]
    fn test_mark_as_read_unknown_id() {
        // テスト項目: 存在しない id の既読化は何も変更しない
        // given (前提条件):
        let store = InMemoryChatStore::new();
        store.publish(message("m1", "L1", "U1", "U2"));

        // when (操作):
        let updated = store.mark_as_read("nope");

        // then (期待する結果):
        assert_eq!(updated, 0);
        assert!(!store.messages()[0].is_read);
    }
}
