use async_trait::async_trait;

use crate::domain::otp::models::AccessStatus;
use crate::domain::otp::models::IssuedAccess;
use crate::domain::otp::models::IssuedChallenge;
use crate::domain::otp::models::Passcode;
use crate::domain::otp::models::PhoneNumber;
use crate::domain::otp::models::VerifyChallengeCommand;
use crate::otp::errors::DeliveryError;
use crate::otp::errors::OtpError;

/// Port for the OTP authentication flow.
///
/// Implementations hold no per-session state; everything a later call needs
/// travels inside the tokens they hand out.
#[async_trait]
pub trait OtpServicePort: Send + Sync + 'static {
    /// Issue a challenge token for a phone number and deliver its passcode.
    ///
    /// # Arguments
    /// * `phone_number` - Validated phone number
    ///
    /// # Returns
    /// Challenge token with its lifetime, and the passcode when echo is enabled
    ///
    /// # Errors
    /// * `DeliveryFailed` - Passcode could not be handed to the delivery channel
    /// * `TokenIssuance` - Token signing failed
    async fn issue_challenge(&self, phone_number: PhoneNumber)
        -> Result<IssuedChallenge, OtpError>;

    /// Check a passcode against a challenge token and mint an access token.
    ///
    /// # Arguments
    /// * `command` - Challenge token and supplied passcode
    ///
    /// # Returns
    /// Access token carrying the challenge's phone number
    ///
    /// # Errors
    /// * `InvalidOrExpiredChallenge` - Challenge token does not decode
    /// * `PasscodeMismatch` - Supplied passcode differs from the embedded one
    /// * `TokenIssuance` - Token signing failed
    async fn verify_challenge(
        &self,
        command: VerifyChallengeCommand,
    ) -> Result<IssuedAccess, OtpError>;

    /// Validate a bearer access token.
    ///
    /// # Arguments
    /// * `access_token` - Token from the Authorization header, if any
    ///
    /// # Returns
    /// `NoToken` when absent, `Invalid` for any decode failure, `Valid` otherwise
    fn validate_access(&self, access_token: Option<&str>) -> AccessStatus;
}

/// Out-of-band passcode delivery (SMS in production).
#[async_trait]
pub trait PasscodeSender: Send + Sync + 'static {
    /// Deliver a passcode to the owner of a phone number.
    ///
    /// # Errors
    /// * `Unavailable` - Delivery channel could not be reached
    /// * `Rejected` - Delivery channel refused the message
    async fn send_passcode(
        &self,
        phone_number: &PhoneNumber,
        passcode: &Passcode,
    ) -> Result<(), DeliveryError>;
}
