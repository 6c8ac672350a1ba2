//! Listing chat transport for the rentchat marketplace.
//!
//! A [`usecase::ChatSession`] owns one [`domain::ChatTransport`] for the conversation
//! currently on screen. Inbound frames are normalized by [`domain::MessageFactory`] and
//! published through a [`domain::MessageSink`]. The transport is either a real WebSocket
//! connection or a local mock, chosen once from [`config::ChatConfig`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use config::ChatConfig;
pub use error::ChatError;
pub use ui::run_client;
