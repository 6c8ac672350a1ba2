//! Chat wire protocol.
//!
//! Frames are JSON objects. The server pushes [`Message`]s (which clients must accept
//! in partial form, see [`PartialMessage`]) and clients send [`CreateMessagePayload`]s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::time::parse_timestamp;

/// A chat message about one listing, exchanged between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub listing_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Copy of this message flagged as read.
    pub fn as_read(&self) -> Self {
        Self {
            is_read: true,
            ..self.clone()
        }
    }
}

/// Inbound frame as received over the wire.
///
/// Any subset of the [`Message`] fields may be present; `null` counts as absent.
/// Timestamps are read leniently: an ISO 8601 value without offset is taken as UTC, and
/// a value that is not a timestamp at all counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMessage {
    pub id: Option<String>,
    pub content: Option<String>,
    pub listing_id: Option<String>,
    pub sender_id: Option<String>,
    pub receiver_id: Option<String>,
    pub is_read: Option<bool>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PartialMessage {
    /// Parse one inbound text frame.
    ///
    /// # Errors
    ///
    /// The frame is not a JSON object, or a non-timestamp field has the wrong type.
    pub fn from_frame(text: &str) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_str(text)?;
        serde_json::from_value(Value::Object(object))
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => parse_timestamp(&raw),
        _ => None,
    })
}

/// Outbound frame: a message to send, without id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessagePayload {
    pub content: String,
    pub listing_id: String,
    pub sender_id: String,
    pub receiver_id: String,
}

impl CreateMessagePayload {
    pub fn new(
        content: impl Into<String>,
        listing_id: impl Into<String>,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            listing_id: listing_id.into(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
        }
    }
}
