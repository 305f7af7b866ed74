use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasscodeGenerator;
use auth::TokenCodec;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::config::OtpConfig;
use crate::domain::otp::models::AccessClaims;
use crate::domain::otp::models::AccessStatus;
use crate::domain::otp::models::ChallengeClaims;
use crate::domain::otp::models::IssuedAccess;
use crate::domain::otp::models::IssuedChallenge;
use crate::domain::otp::models::Passcode;
use crate::domain::otp::models::PhoneNumber;
use crate::domain::otp::models::VerifyChallengeCommand;
use crate::domain::otp::models::ACCESS_AUDIENCE;
use crate::domain::otp::models::CHALLENGE_AUDIENCE;
use crate::otp::errors::OtpError;
use crate::otp::ports::OtpServicePort;
use crate::otp::ports::PasscodeSender;

/// Token lifetimes and response shaping for the OTP flow.
#[derive(Debug, Clone)]
pub struct OtpSettings {
    pub challenge_ttl: Duration,
    pub access_ttl: Duration,
    /// Return the passcode in the issue response. Demo use only.
    pub echo_passcode: bool,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            challenge_ttl: Duration::minutes(5),
            access_ttl: Duration::hours(1),
            echo_passcode: false,
        }
    }
}

impl From<&OtpConfig> for OtpSettings {
    fn from(config: &OtpConfig) -> Self {
        Self {
            challenge_ttl: config.challenge_ttl(),
            access_ttl: config.access_ttl(),
            echo_passcode: config.echo_passcode,
        }
    }
}

/// Domain service implementation for the OTP flow.
///
/// Concrete implementation of OtpServicePort with dependency injection.
pub struct OtpService<PS>
where
    PS: PasscodeSender,
{
    codec: Arc<TokenCodec>,
    passcode_sender: Arc<PS>,
    passcodes: PasscodeGenerator,
    settings: OtpSettings,
}

impl<PS> OtpService<PS>
where
    PS: PasscodeSender,
{
    /// Create a new OTP service with injected dependencies.
    ///
    /// # Arguments
    /// * `codec` - Token codec holding the signing secret
    /// * `passcode_sender` - Out-of-band passcode delivery
    /// * `settings` - Token lifetimes and echo flag
    ///
    /// # Returns
    /// Configured OTP service instance
    pub fn new(codec: Arc<TokenCodec>, passcode_sender: Arc<PS>, settings: OtpSettings) -> Self {
        Self {
            codec,
            passcode_sender,
            passcodes: PasscodeGenerator::new(),
            settings,
        }
    }

    fn decode_challenge(&self, token: &str) -> Result<(PhoneNumber, Passcode), OtpError> {
        let claims: Claims<ChallengeClaims> =
            self.codec.decode(CHALLENGE_AUDIENCE, token).map_err(|e| {
                tracing::debug!(error = %e, "Challenge token rejected");
                OtpError::InvalidOrExpiredChallenge
            })?;

        let challenge = claims.into_custom();
        let phone_number = PhoneNumber::new(challenge.phone_number)
            .map_err(|_| OtpError::InvalidOrExpiredChallenge)?;
        let passcode =
            Passcode::new(challenge.passcode).map_err(|_| OtpError::InvalidOrExpiredChallenge)?;

        Ok((phone_number, passcode))
    }
}

#[async_trait]
impl<PS> OtpServicePort for OtpService<PS>
where
    PS: PasscodeSender,
{
    async fn issue_challenge(
        &self,
        phone_number: PhoneNumber,
    ) -> Result<IssuedChallenge, OtpError> {
        let passcode = Passcode::generate(&self.passcodes);

        let challenge_token = self
            .codec
            .encode(
                CHALLENGE_AUDIENCE,
                &ChallengeClaims::new(&phone_number, &passcode),
                self.settings.challenge_ttl,
            )
            .map_err(|e| OtpError::TokenIssuance(e.to_string()))?;

        self.passcode_sender
            .send_passcode(&phone_number, &passcode)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone_number = %phone_number.masked(),
                    error = %e,
                    "Failed to deliver passcode"
                );
                OtpError::from(e)
            })?;

        tracing::info!(
            phone_number = %phone_number.masked(),
            ttl_seconds = self.settings.challenge_ttl.num_seconds(),
            "Challenge issued"
        );

        Ok(IssuedChallenge {
            challenge_token,
            expires_in: self.settings.challenge_ttl,
            passcode: self.settings.echo_passcode.then_some(passcode),
        })
    }

    async fn verify_challenge(
        &self,
        command: VerifyChallengeCommand,
    ) -> Result<IssuedAccess, OtpError> {
        let (phone_number, expected) = self.decode_challenge(&command.challenge_token)?;

        if !self.passcodes.verify(&command.passcode, expected.as_str()) {
            tracing::warn!(phone_number = %phone_number.masked(), "Passcode mismatch");
            return Err(OtpError::PasscodeMismatch);
        }

        let access_token = self
            .codec
            .encode(
                ACCESS_AUDIENCE,
                &AccessClaims::new(&phone_number),
                self.settings.access_ttl,
            )
            .map_err(|e| OtpError::TokenIssuance(e.to_string()))?;

        tracing::info!(phone_number = %phone_number.masked(), "Challenge verified");

        Ok(IssuedAccess {
            access_token,
            expires_in: self.settings.access_ttl,
            phone_number,
        })
    }

    fn validate_access(&self, access_token: Option<&str>) -> AccessStatus {
        let Some(token) = access_token else {
            return AccessStatus::NoToken;
        };

        let claims: Claims<AccessClaims> = match self.codec.decode(ACCESS_AUDIENCE, token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                return AccessStatus::Invalid;
            }
        };

        let expires_at: Option<DateTime<Utc>> = claims.expires_at();
        match (PhoneNumber::new(claims.into_custom().phone_number), expires_at) {
            (Ok(phone_number), Some(expires_at)) => AccessStatus::Valid {
                phone_number,
                expires_at,
            },
            _ => AccessStatus::Invalid,
        }
    }
}
