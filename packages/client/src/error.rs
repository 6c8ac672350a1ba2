//! Client error definitions.
//!
//! Transport operations never return these: they are logged at the point of failure
//! and the transport stays idle. Only the CLI entry point propagates them.

use rentchat_shared::ValueObjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The configured API base URL does not parse
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The API base URL scheme has no WebSocket equivalent
    #[error("unsupported URL scheme '{0}' (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    /// The API base URL cannot carry a path (e.g. `http:foo`)
    #[error("API base URL '{0}' cannot be a base")]
    CannotBeABase(String),

    /// Work was requested outside of a tokio runtime
    #[error("no tokio runtime is running")]
    NoRuntime,

    /// Conversation identifiers given on the command line are invalid
    #[error("invalid conversation: {0}")]
    InvalidConversation(#[from] ValueObjectError),
}
