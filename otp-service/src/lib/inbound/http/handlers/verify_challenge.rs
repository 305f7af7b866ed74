use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::otp::models::IssuedAccess;
use crate::domain::otp::models::VerifyChallengeCommand;
use crate::domain::otp::ports::OtpServicePort;
use crate::inbound::http::router::AppState;

pub async fn verify_challenge(
    State(state): State<AppState>,
    body: Result<Json<VerifyChallengeRequest>, JsonRejection>,
) -> Result<ApiSuccess<VerifyChallengeResponseData>, ApiError> {
    let Json(body) = body?;
    let command = VerifyChallengeCommand::new(body.challenge_token, body.passcode)?;

    state
        .otp_service
        .verify_challenge(command)
        .await
        .map_err(ApiError::from)
        .map(|ref access| ApiSuccess::new(StatusCode::OK, access.into()))
}

/// HTTP request body for verifying a challenge (raw JSON)
///
/// Also accepts the `sessionId` / `otp` field names used by older clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyChallengeRequest {
    #[serde(alias = "sessionId")]
    challenge_token: Option<String>,
    #[serde(alias = "otp")]
    passcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyChallengeResponseData {
    pub access_token: String,
    pub expires_in: i64,
    pub message: String,
}

impl From<&IssuedAccess> for VerifyChallengeResponseData {
    fn from(access: &IssuedAccess) -> Self {
        Self {
            access_token: access.access_token.clone(),
            expires_in: access.expires_in.num_seconds(),
            message: "OTP verified successfully".to_string(),
        }
    }
}
