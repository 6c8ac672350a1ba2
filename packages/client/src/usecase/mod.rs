//! UseCase 層
//!
//! 画面（UI 層）から呼び出され、Domain 層の ChatTransport を操作します。

pub mod chat_session;

pub use chat_session::ChatSession;
