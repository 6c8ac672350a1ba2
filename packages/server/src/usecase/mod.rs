//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod join_conversation;
pub mod leave_conversation;
pub mod relay_message;

pub use error::{JoinError, RelayError};
pub use join_conversation::JoinConversationUseCase;
pub use leave_conversation::LeaveConversationUseCase;
pub use relay_message::RelayMessageUseCase;
