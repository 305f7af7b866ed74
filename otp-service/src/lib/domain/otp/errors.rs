use thiserror::Error;

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number is empty")]
    Empty,

    #[error("Phone number must start with '+'")]
    MissingPlusPrefix,

    #[error("Phone number must have {min} to {max} digits after '+', got {actual}")]
    InvalidDigitCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Phone number contains non-digit characters")]
    NonDigit,

    #[error("Phone number country code cannot start with 0")]
    LeadingZero,
}

/// Error for passcode delivery
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Passcode delivery channel unavailable: {0}")]
    Unavailable(String),

    #[error("Passcode delivery rejected: {0}")]
    Rejected(String),
}

/// Top-level error for the OTP flow
///
/// Every variant is a per-request outcome. None of them leaves state behind.
#[derive(Debug, Clone, Error)]
pub enum OtpError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(#[from] PhoneNumberError),

    #[error("Missing required fields")]
    MissingFields,

    // Bad signature, malformed token and elapsed expiry all land here on purpose.
    #[error("Invalid or expired challenge")]
    InvalidOrExpiredChallenge,

    #[error("Passcode does not match")]
    PasscodeMismatch,

    #[error("Failed to deliver passcode: {0}")]
    DeliveryFailed(#[from] DeliveryError),

    #[error("Failed to issue token: {0}")]
    TokenIssuance(String),
}
