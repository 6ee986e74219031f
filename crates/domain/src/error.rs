//! Domain error types

use thiserror::Error;

use crate::wizard::WizardStep;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A reading status string is not one of the known values.
    #[error("invalid reading status: {0}")]
    InvalidReadingStatus(String),

    /// An exchange status string is not one of the known values.
    #[error("invalid exchange status: {0}")]
    InvalidExchangeStatus(String),

    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A user tried to trade with themselves.
    #[error("cannot create an exchange with yourself")]
    SelfExchange,

    /// The user has no books offered for exchange.
    #[error("you have no books marked for exchange")]
    NothingToOffer,

    /// A wizard step was left with nothing selected.
    #[error("select at least one item in step {} before continuing", .step.number())]
    EmptySelection {
        /// The step whose guard failed.
        step: WizardStep,
    },

    /// A wizard operation was attempted from the wrong step.
    #[error("wizard is at step {}, expected step {}", .actual.number(), .expected.number())]
    WrongStep {
        /// Step the operation requires.
        expected: WizardStep,
        /// Step the wizard is actually at.
        actual: WizardStep,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
