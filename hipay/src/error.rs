//! Error types for HiPay operations.
//!
//! [`Failure`] is what every [`PaymentGateway`](crate::gateway::PaymentGateway)
//! operation returns on error. It distinguishes the three shapes a failure
//! can take, which callers normalize differently:
//!
//! - a structured error carrying a kind name and a message,
//! - a bare message,
//! - an arbitrary payload that is neither.
//!
//! [`ValidationError`] reports request fields that fail local checks before
//! any remote call is made.

use serde_json::Value;

/// A failed gateway operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Failure {
    /// A structured error with a kind name (e.g. `"ApiError"`) and message.
    #[error("{name}: {message}")]
    Error {
        /// The error kind.
        name: String,
        /// Human-readable description.
        message: String,
    },

    /// A bare message with no error kind attached.
    #[error("{0}")]
    Message(String),

    /// Any other failure payload.
    #[error("unrecognized failure: {0}")]
    Other(Value),
}

impl Failure {
    /// Creates a structured error failure.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a bare message failure.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Creates a failure from an arbitrary payload.
    #[must_use]
    pub const fn other(payload: Value) -> Self {
        Self::Other(payload)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Self::error(ValidationError::NAME, err.to_string())
    }
}

/// A request field that failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The field does not hold a plausible email address.
    #[error("invalid email address `{value}` in field `{field}`")]
    Email {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The field does not hold an absolute URL.
    #[error("invalid URL `{value}` in field `{field}`: {source}")]
    Url {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl ValidationError {
    /// Error kind name used when a validation error becomes a [`Failure`].
    pub const NAME: &'static str = "ValidationError";
}
