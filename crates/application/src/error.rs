//! Application error types

use booky_domain::DomainError;
use thiserror::Error;

use crate::ports::{HttpClientError, StorageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The request never got a response.
    #[error(transparent)]
    Transport(#[from] HttpClientError),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Input was rejected locally, before any network call.
    #[error("{0}")]
    Validation(String),

    /// The operation needs a signed-in user.
    #[error("no active session")]
    SessionMissing,

    /// Session storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A domain validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true for failures detected before any network call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }

    /// Returns the HTTP status of a backend rejection.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
