//! MessageSink の実装

pub mod broadcast;
pub mod store;

pub use broadcast::BroadcastSink;
pub use store::InMemoryChatStore;
