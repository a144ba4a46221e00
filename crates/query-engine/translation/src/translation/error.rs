//! Errors for query translation.

/// A request parameter did not have an acceptable shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
        }
    }
}

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request is invalid. Surfaced to the client as is.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The adapter was asked for an operation it does not implement.
    #[error("Operator '{0}' is not supported by this adapter.")]
    UnsupportedOperator(String),
    #[error("Queries containing {0} are not supported.")]
    NotSupported(String),
}
