use std::fmt;

use auth::PasscodeError;
use auth::PasscodeGenerator;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::otp::errors::OtpError;
use crate::otp::errors::PhoneNumberError;

/// Audience carried by challenge tokens.
pub const CHALLENGE_AUDIENCE: &str = "otp-challenge";

/// Audience carried by access tokens.
pub const ACCESS_AUDIENCE: &str = "otp-access";

/// Phone number value type
///
/// International format: `+` followed by 2 to 15 digits, the first of which is
/// not zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 2;
    const MAX_DIGITS: usize = 15;

    /// Create a new valid phone number.
    ///
    /// # Arguments
    /// * `phone_number` - Raw phone number string
    ///
    /// # Returns
    /// Validated PhoneNumber value object
    ///
    /// # Errors
    /// * `Empty` - Input is empty
    /// * `MissingPlusPrefix` - Does not start with `+`
    /// * `NonDigit` - Contains anything but digits after `+`
    /// * `InvalidDigitCount` - Fewer than 2 or more than 15 digits
    /// * `LeadingZero` - First digit is 0
    pub fn new(phone_number: String) -> Result<Self, PhoneNumberError> {
        if phone_number.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let digits = phone_number
            .strip_prefix('+')
            .ok_or(PhoneNumberError::MissingPlusPrefix)?;
        Self::with_valid_digits(digits)?;

        Ok(Self(phone_number))
    }

    fn with_valid_digits(digits: &str) -> Result<(), PhoneNumberError> {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneNumberError::NonDigit);
        }

        let count = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&count) {
            return Err(PhoneNumberError::InvalidDigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                actual: count,
            });
        }

        if digits.starts_with('0') {
            return Err(PhoneNumberError::LeadingZero);
        }

        Ok(())
    }

    /// Get phone number as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Phone number with the middle digits hidden, for logs.
    ///
    /// Keeps the `+`, the first two and the last two digits.
    pub fn masked(&self) -> String {
        let digits = &self.0[1..];
        if digits.len() <= 4 {
            return format!("+{}", "*".repeat(digits.len()));
        }
        format!(
            "+{}{}{}",
            &digits[..2],
            "*".repeat(digits.len() - 4),
            &digits[digits.len() - 2..]
        )
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One-time passcode value type (six decimal digits)
#[derive(Clone, PartialEq, Eq)]
pub struct Passcode(String);

impl Passcode {
    /// Draw a fresh passcode.
    pub fn generate(generator: &PasscodeGenerator) -> Self {
        Self(generator.generate())
    }

    /// Parse an existing passcode.
    ///
    /// # Errors
    /// * `InvalidLength` - Not exactly six characters
    /// * `NonDigit` - Contains anything but ASCII digits
    pub fn new(passcode: String) -> Result<Self, PasscodeError> {
        PasscodeGenerator::new().validate_format(&passcode)?;
        Ok(Self(passcode))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print passcodes through Debug.
impl fmt::Debug for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passcode(******)")
    }
}

/// Custom claims of a challenge token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeClaims {
    pub phone_number: String,
    pub passcode: String,
}

impl ChallengeClaims {
    pub fn new(phone_number: &PhoneNumber, passcode: &Passcode) -> Self {
        Self {
            phone_number: phone_number.as_str().to_string(),
            passcode: passcode.as_str().to_string(),
        }
    }
}

/// Custom claims of an access token. Only the phone number travels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub phone_number: String,
}

impl AccessClaims {
    pub fn new(phone_number: &PhoneNumber) -> Self {
        Self {
            phone_number: phone_number.as_str().to_string(),
        }
    }
}

/// Command to verify a challenge.
///
/// Both fields are present and non-empty once constructed.
#[derive(Debug)]
pub struct VerifyChallengeCommand {
    pub challenge_token: String,
    pub passcode: String,
}

impl VerifyChallengeCommand {
    /// Construct a verify command from raw request fields.
    ///
    /// # Errors
    /// * `MissingFields` - Either field is absent or empty
    pub fn new(
        challenge_token: Option<String>,
        passcode: Option<String>,
    ) -> Result<Self, OtpError> {
        match (challenge_token, passcode) {
            (Some(challenge_token), Some(passcode))
                if !challenge_token.is_empty() && !passcode.is_empty() =>
            {
                Ok(Self {
                    challenge_token,
                    passcode,
                })
            }
            _ => Err(OtpError::MissingFields),
        }
    }
}

/// Result of a successful challenge issuance.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub challenge_token: String,
    pub expires_in: Duration,
    /// Present only when passcode echo is enabled
    pub passcode: Option<Passcode>,
}

/// Result of a successful challenge verification.
#[derive(Debug, Clone)]
pub struct IssuedAccess {
    pub access_token: String,
    pub expires_in: Duration,
    pub phone_number: PhoneNumber,
}

/// Outcome of access token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessStatus {
    Valid {
        phone_number: PhoneNumber,
        expires_at: DateTime<Utc>,
    },
    Invalid,
    NoToken,
}

impl AccessStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, AccessStatus::Valid { .. })
    }
}
