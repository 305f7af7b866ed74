use thiserror::Error;

/// Error type for passcode parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasscodeError {
    #[error("Passcode must be exactly {expected} digits, got {actual} characters")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Passcode must contain only ASCII digits")]
    NonDigit,
}
