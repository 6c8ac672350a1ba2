//! Error definitions shared by the client and the server.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ListingId validation error
    #[error("ListingId cannot be empty")]
    ListingIdEmpty,

    /// ListingId too long error
    #[error("ListingId cannot exceed {max} characters (got {actual})")]
    ListingIdTooLong { max: usize, actual: usize },

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// AuthToken validation error
    #[error("AuthToken cannot be empty")]
    AuthTokenEmpty,
}
