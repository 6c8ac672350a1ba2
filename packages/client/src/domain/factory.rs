//! Message normalization.
//!
//! Frames from the wire may omit any field. [`MessageFactory`] fills the gaps so the
//! rest of the application only ever sees complete [`Message`]s. The two sources of
//! variability, the current time and fresh ids, are injected.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rentchat_shared::{CreateMessagePayload, Message, PartialMessage, time::now_utc};

/// Source of "now".
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh, globally unique message ids.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now_utc()
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Builds complete messages from partial frames and outgoing payloads.
#[derive(Clone)]
pub struct MessageFactory {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MessageFactory {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Factory backed by the wall clock and UUID v4 ids.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidIdGenerator))
    }

    /// Fill in every field missing from an inbound frame.
    ///
    /// - `id`: fresh id
    /// - `content`, `listing_id`, `sender_id`, `receiver_id`: empty string
    /// - `is_read`: false
    /// - `sent_at`: now
    /// - `updated_at`: `sent_at` from the frame, else now
    ///
    /// "Now" is read once, so both timestamps agree when both are absent.
    pub fn normalize(&self, raw: PartialMessage) -> Message {
        let now = self.clock.now();
        let id = match raw.id {
            Some(id) => id,
            None => self.ids.generate(),
        };
        Message {
            id,
            content: raw.content.unwrap_or_default(),
            listing_id: raw.listing_id.unwrap_or_default(),
            sender_id: raw.sender_id.unwrap_or_default(),
            receiver_id: raw.receiver_id.unwrap_or_default(),
            is_read: raw.is_read.unwrap_or(false),
            sent_at: raw.sent_at.unwrap_or(now),
            updated_at: raw.updated_at.or(raw.sent_at).unwrap_or(now),
        }
    }

    /// Message a server would echo back for `payload`: fresh id, current timestamps, unread.
    pub fn echo(&self, payload: CreateMessagePayload) -> Message {
        let now = self.clock.now();
        Message {
            id: self.ids.generate(),
            content: payload.content,
            listing_id: payload.listing_id,
            sender_id: payload.sender_id,
            receiver_id: payload.receiver_id,
            is_read: false,
            sent_at: now,
            updated_at: now,
        }
    }
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::system()
    }
}
