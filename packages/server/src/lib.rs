//! Development relay server for the rentchat listing chat protocol.
//!
//! Accepts chat WebSocket connections at `/v1/listings/{listing_id}/chat/{receiver_id}`,
//! completes each sent message (id, timestamps, read flag) and relays it to every
//! connection of the conversation, the sender included.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use ui::{run, serve};
