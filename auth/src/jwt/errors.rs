use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` and `Invalid` are kept apart for logging only. Consumers that
/// face clients are expected to treat both as "no usable token".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
