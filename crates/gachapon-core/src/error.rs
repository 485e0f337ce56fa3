//! Domain error types.

use thiserror::Error;

/// Top-level error type for the picker engine.
#[derive(Debug, Error)]
pub enum GachaError {
    /// A validation error in domain logic. The message is suitable for
    /// showing to the user as-is.
    #[error("validation error: {0}")]
    Validation(String),

    /// A storage/persistence error.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A stored state blob that could not be decoded.
    #[error("malformed state: {0}")]
    MalformedState(String),
}

impl GachaError {
    /// The message to surface to the user, without the error-kind prefix.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Persistence(msg) | Self::MalformedState(msg) => msg,
        }
    }
}
