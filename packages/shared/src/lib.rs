//! Shared building blocks for the rentchat client and relay server.
//!
//! Holds the chat wire protocol, the identifier value objects both sides validate,
//! and the logging/time helpers used by the binaries.

pub mod error;
pub mod logger;
pub mod protocol;
pub mod time;
pub mod value_object;

pub use error::ValueObjectError;
pub use protocol::{CreateMessagePayload, Message, PartialMessage};
pub use value_object::{AuthToken, ListingId, UserId};
