//! Connection identity and lifecycle.

use std::fmt;

use rentchat_shared::{AuthToken, ListingId, UserId, ValueObjectError};

/// Identity of one live chat connection.
///
/// The current user talks with `receiver_id` about `listing_id`, authenticated by `token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub listing_id: ListingId,
    pub receiver_id: UserId,
    pub token: AuthToken,
}

impl ConversationKey {
    pub fn new(listing_id: ListingId, receiver_id: UserId, token: AuthToken) -> Self {
        Self {
            listing_id,
            receiver_id,
            token,
        }
    }

    /// Validate raw identifiers into a key.
    pub fn try_new(
        listing_id: impl Into<String>,
        receiver_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ValueObjectError> {
        Ok(Self {
            listing_id: ListingId::new(listing_id.into())?,
            receiver_id: UserId::new(receiver_id.into())?,
            token: AuthToken::new(token.into())?,
        })
    }

    /// Key for the conversation a view is showing, if it can show one.
    ///
    /// Returns `None` when any input is missing or invalid; the view then stays
    /// without a connection.
    pub fn from_view(
        listing_id: Option<&str>,
        receiver_id: Option<&str>,
        token: Option<&str>,
    ) -> Option<Self> {
        match (listing_id, receiver_id, token) {
            (Some(listing_id), Some(receiver_id), Some(token)) => {
                Self::try_new(listing_id, receiver_id, token).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing {} with {}", self.listing_id, self.receiver_id)
    }
}

/// Lifecycle of a transport's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection handle
    #[default]
    Idle,
    /// Handle held, handshake in progress
    Connecting,
    /// Handshake completed; frames flow both ways
    Open,
    /// Handle held but the socket is gone (peer close, error, end of stream)
    Closed,
}

impl ConnectionState {
    /// A connection exists and is open or opening; `connect` must not start another.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }

    /// Whether a transport error in this state is worth reporting.
    ///
    /// Errors before the connection opened are handshake noise (typically a
    /// teardown racing the open) and are only traced at debug level.
    pub fn should_report_transport_error(self) -> bool {
        self == Self::Open
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}
